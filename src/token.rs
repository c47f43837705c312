use crate::error::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// File name of the persisted token, relative to the home directory
pub const TOKEN_FILE_NAME: &str = ".minso-token";

/// Plain-text bearer token persisted at a fixed path.
///
/// At most one token is stored at a time: `save` replaces the file
/// atomically and `clear` removes it. Concurrent processes writing the same
/// file race with last-writer-wins semantics; nothing is locked.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    /// `~/.minso-token`, or `./.minso-token` when no home directory is known
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(TOKEN_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the token. A missing file is not an error and yields `None`,
    /// as does a file holding only whitespace.
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                debug!(path = %self.path.display(), "loaded token file");
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the token, replacing any previous one. The content is written
    /// to a temporary file in the same directory and renamed into place.
    pub fn save(&self, token: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(token.as_bytes())?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), "saved token file");
        Ok(())
    }

    /// Delete the token file if it exists
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed token file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        TokenStore::new(Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TokenStore {
        TokenStore::new(dir.path().join(TOKEN_FILE_NAME))
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save("tok123").unwrap();
        assert_eq!(store.load().unwrap(), Some("tok123".to_string()));

        // a second store on the same path sees the same token
        let other = store_in(&dir);
        assert_eq!(other.load().unwrap(), Some("tok123".to_string()));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save("a-much-longer-first-token").unwrap();
        store.save("short").unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "short");
    }

    #[test]
    fn test_load_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "tok456\n").unwrap();
        assert_eq!(store.load().unwrap(), Some("tok456".to_string()));

        fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save("tok").unwrap();
        assert!(store.exists());
        store.clear().unwrap();
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), None);

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path());
        assert!(store.load().is_err());
    }

    #[test]
    fn test_default_path_file_name() {
        let path = TokenStore::default_path();
        assert!(path.ends_with(TOKEN_FILE_NAME));
    }
}
