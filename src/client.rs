use crate::error::Result;
use reqwest::blocking::{Client, ClientBuilder};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Fixed timeout applied to every API request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the HTTP client for API requests
pub fn create_rest_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct Config {
    /// API root, requests are made to `base_url + path`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Create a new configuration for the given API root
    pub fn new(base_url: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            ..Config::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP methods the API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Whether a JSON body is sent with this method
    pub fn accepts_body(self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status code and body bytes
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the wire. The executor only talks to this trait so
/// that the network can be replaced in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by a blocking reqwest client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ReqwestTransport {
            client: create_rest_client(config)?,
        })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
