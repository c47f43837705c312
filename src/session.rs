/// Per-process session: where the API lives and who we are on it.
///
/// Created at start-up, populated by register/login (or by the persisted
/// token), cleared by logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub base_url: String,
    pub token: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Session {
            base_url: base_url.into(),
            ..Session::default()
        }
    }

    /// Whether a non-empty bearer token is available
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Record the identity returned by register/login
    pub fn sign_in(&mut self, token: String, username: String, user_id: String) {
        self.token = Some(token);
        self.username = Some(username);
        self.user_id = Some(user_id);
    }

    /// Forget token and identity, keeping the base URL
    pub fn clear(&mut self) {
        self.token = None;
        self.username = None;
        self.user_id = None;
    }
}
