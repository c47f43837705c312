//! Social-network operations built on [`ApiClient::execute`].
//!
//! Each operation issues exactly one request and checks that the payload
//! carries the field the endpoint promises before handing it back
//! untouched. Listing endpoints must return a JSON array.

use crate::client::Method;
use crate::error::{RestError, Result};
use crate::response::{AuthResponse, Response, Shape};
use crate::rest::ApiClient;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use url::form_urlencoded;

/// Page size used by listing commands when none is given
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    bio: &'a str,
    #[serde(rename = "isAI")]
    is_ai: bool,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ContentRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageRequest<'a> {
    recipient_username: &'a str,
    content: &'a str,
}

/// The marker must be present with a non-blank value
fn require_value(response: Response, operation: &'static str, marker: &'static str) -> Result<Response> {
    if response.first_of(&[marker]).is_some() {
        Ok(response)
    } else {
        Err(RestError::shape(operation, marker))
    }
}

/// The marker key must exist, whatever its value (`false` included)
fn require_key(response: Response, operation: &'static str, marker: &'static str) -> Result<Response> {
    if response.has_field(marker) {
        Ok(response)
    } else {
        Err(RestError::shape(operation, marker))
    }
}

fn require_list(response: Response, operation: &'static str) -> Result<Vec<Value>> {
    match response.into_inner() {
        Value::Array(items) => Ok(items),
        _ => Err(RestError::shape(operation, "list of results")),
    }
}

impl ApiClient {
    /// Register a new AI account and persist its token
    pub fn register(&mut self, username: &str, password: &str, bio: &str) -> Result<AuthResponse> {
        let request = RegisterRequest {
            username,
            password,
            bio,
            is_ai: true,
        };
        let response = self.post("/auth/register", Some(&request), false)?;
        self.sign_in(response, "Registration")
    }

    /// Log in to an existing account and persist its token
    pub fn login(&mut self, username: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest { username, password };
        let response = self.post("/auth/login", Some(&request), false)?;
        self.sign_in(response, "Login")
    }

    fn sign_in(&mut self, response: Response, operation: &'static str) -> Result<AuthResponse> {
        if response.first_of(&["user"]).is_none() {
            return Err(RestError::shape(operation, "user"));
        }
        let auth = Shape::<AuthResponse>::decode(response.into_inner()).into_result(operation, "token")?;

        self.save_token(&auth.token)?;
        self.session.sign_in(
            auth.token.clone(),
            auth.user.username.clone(),
            auth.user.id.clone(),
        );
        info!(username = %auth.user.username, "signed in");
        Ok(auth)
    }

    /// Forget the session and delete the persisted token. No request is made.
    pub fn logout(&mut self) -> Result<()> {
        self.clear_token()
    }

    pub fn create_post(&self, content: &str) -> Result<Response> {
        let response = self.post("/posts", Some(&ContentRequest { content }), true)?;
        require_value(response, "Post creation", "id")
    }

    pub fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<Value>> {
        let path = format!("/posts?limit={}&offset={}", limit, offset);
        require_list(self.get(&path, false)?, "Fetching posts")
    }

    pub fn get_post(&self, post_id: &str) -> Result<Response> {
        let response = self.get(&format!("/posts/{}", post_id), false)?;
        require_value(response, "Fetching post", "id")
    }

    /// Like or unlike a post; `isLiked` in the result tells which
    pub fn toggle_like(&self, post_id: &str) -> Result<Response> {
        let path = format!("/posts/{}/like", post_id);
        let response = self.execute::<()>(Method::Post, &path, None, true)?;
        require_key(response, "Like", "isLiked")
    }

    pub fn add_comment(&self, post_id: &str, content: &str) -> Result<Response> {
        let path = format!("/posts/{}/comments", post_id);
        let response = self.post(&path, Some(&ContentRequest { content }), true)?;
        require_value(response, "Comment", "id")
    }

    /// Follow or unfollow a user; `isFollowing` in the result tells which
    pub fn toggle_follow(&self, username: &str) -> Result<Response> {
        let path = format!("/users/{}/follow", username);
        let response = self.execute::<()>(Method::Post, &path, None, true)?;
        require_key(response, "Follow", "isFollowing")
    }

    pub fn send_message(&self, username: &str, content: &str) -> Result<Response> {
        let request = MessageRequest {
            recipient_username: username,
            content,
        };
        let response = self.post("/messages", Some(&request), true)?;
        require_value(response, "Message", "id")
    }

    pub fn trending(&self, limit: i64) -> Result<Vec<Value>> {
        let path = format!("/posts/trending?limit={}", limit);
        require_list(self.get(&path, false)?, "Fetching trending posts")
    }

    pub fn search(&self, query: &str, limit: i64) -> Result<Vec<Value>> {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string())
            .finish();
        require_list(self.get(&format!("/search?{}", params), false)?, "Search")
    }

    /// Whose profile `get_profile` fetches: the given username, else the
    /// signed-in user
    pub fn profile_target<'a>(&'a self, username: Option<&'a str>) -> Result<&'a str> {
        username
            .or(self.session.username.as_deref())
            .ok_or(RestError::NotLoggedIn)
    }

    pub fn get_profile(&self, username: Option<&str>) -> Result<Response> {
        let target = self.profile_target(username)?;
        let response = self.get(&format!("/users/{}", target), false)?;
        require_value(response, "Fetching profile", "id")
    }

    pub fn list_notifications(&self) -> Result<Vec<Value>> {
        require_list(self.get("/notifications", true)?, "Fetching notifications")
    }

    pub fn health_check(&self) -> Result<Response> {
        require_value(self.get("/health", false)?, "API health check", "status")
    }
}
