use crate::client::{Config, HttpRequest, Method, ReqwestTransport, Transport};
use crate::error::{RestError, Result};
use crate::response::Response;
use crate::session::Session;
use crate::token::TokenStore;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Authenticated API client.
///
/// Owns the session, the token store and the transport. Every domain
/// operation goes through [`ApiClient::execute`].
pub struct ApiClient {
    /// Configuration
    pub config: Config,
    /// Current token and identity
    pub session: Session,
    store: TokenStore,
    transport: Box<dyn Transport>,
}

impl ApiClient {
    /// Create a client with the default token file and a reqwest transport,
    /// loading any persisted token
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, TokenStore::default(), Box::new(transport))
    }

    /// Create a client over an explicit token store and transport,
    /// loading any persisted token
    pub fn with_transport(
        config: Config,
        store: TokenStore,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        let mut client = ApiClient {
            session: Session::new(config.base_url.clone()),
            config,
            store,
            transport,
        };
        client.load_token()?;
        Ok(client)
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    /// Read the persisted token into the session. A missing file leaves the
    /// token unset.
    pub fn load_token(&mut self) -> Result<()> {
        if let Some(token) = self.store.load()? {
            self.session.token = Some(token);
        }
        Ok(())
    }

    /// Persist a token and make it the session token
    pub fn save_token(&mut self, token: &str) -> Result<()> {
        self.store.save(token)?;
        self.session.token = Some(token.to_string());
        Ok(())
    }

    /// Delete the persisted token and reset the session identity
    pub fn clear_token(&mut self) -> Result<()> {
        self.store.clear()?;
        self.session.clear();
        Ok(())
    }

    /// Build the absolute URL for an API path such as `/posts?limit=10`
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let url = format!("{}{}", self.session.base_url.trim_end_matches('/'), path);
        Ok(Url::parse(&url)?)
    }

    /// Execute a request and return the parsed JSON body
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path, appended to the base URL
    /// * `body` - JSON body, sent for POST and PUT only
    /// * `auth_required` - fail before any network call when no token is set
    pub fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth_required: bool,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        if auth_required && !self.session.is_authenticated() {
            return Err(RestError::AuthenticationRequired);
        }

        let url = self.url_for(path)?;

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token.as_deref().filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let body = match body {
            Some(body) if method.accepts_body() => Some(serde_json::to_vec(body)?),
            _ => None,
        };

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        let start = Instant::now();
        let response = self.transport.send(request)?;

        debug!(
            method = %method,
            path,
            status = response.status,
            elapsed = ?start.elapsed(),
            "api request"
        );

        if !response.is_success() {
            return Err(RestError::Http {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let value: serde_json::Value = serde_json::from_slice(&response.body)?;
        Ok(Response::new(value))
    }

    /// Execute a request without a body
    pub fn get(&self, path: &str, auth_required: bool) -> Result<Response> {
        self.execute::<()>(Method::Get, path, None, auth_required)
    }

    /// Execute a POST with an optional JSON body
    pub fn post<B>(&self, path: &str, body: Option<&B>, auth_required: bool) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::Post, path, body, auth_required)
    }
}
