use thiserror::Error;

/// Main error type for API client operations
#[derive(Debug, Error)]
pub enum RestError {
    /// An endpoint that needs a bearer token was called without one
    #[error("authentication required but no token available")]
    AuthenticationRequired,

    /// Non-success HTTP status
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, TLS or timeout failure
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Success status, but the payload lacks the field the operation checks for
    #[error("{operation} failed: response has no {expected}")]
    ResponseShape {
        operation: &'static str,
        expected: &'static str,
    },

    /// Profile lookup without a username while logged out
    #[error("no username provided and not logged in")]
    NotLoggedIn,

    /// Token file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a [`RestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Request,
    ResponseShape,
    Io,
    Other,
}

impl RestError {
    /// Create a new shape error for an operation
    pub fn shape(operation: &'static str, expected: &'static str) -> Self {
        RestError::ResponseShape {
            operation,
            expected,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestError::AuthenticationRequired => ErrorKind::Authentication,
            RestError::Http { .. }
            | RestError::Transport(_)
            | RestError::RequestBuild(_)
            | RestError::Json(_)
            | RestError::UrlParse(_) => ErrorKind::Request,
            RestError::ResponseShape { .. } => ErrorKind::ResponseShape,
            RestError::Io(_) => ErrorKind::Io,
            RestError::NotLoggedIn | RestError::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RestError::Http { status: 404, .. })
    }

    /// Get the HTTP status code if there is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::Http { status, .. } => Some(*status),
            RestError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(RestError::AuthenticationRequired.kind(), ErrorKind::Authentication);
        assert_eq!(
            RestError::Http {
                status: 500,
                body: "boom".to_string()
            }
            .kind(),
            ErrorKind::Request
        );
        assert_eq!(RestError::shape("Post creation", "id").kind(), ErrorKind::ResponseShape);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(RestError::from(json_err).kind(), ErrorKind::Request);
    }

    #[test]
    fn test_error_not_found() {
        let error = RestError::Http {
            status: 404,
            body: "{\"error\":\"Post not found\"}".to_string(),
        };
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_shape_message_names_operation() {
        let error = RestError::shape("Health check", "status");
        assert_eq!(error.to_string(), "Health check failed: response has no status");
    }
}
