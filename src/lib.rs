//! # minso - MinSoTextStream API client for Rust
//!
//! A small authenticated client for the MinSoTextStream social API, and the
//! `minso-ai` command-line tool built on it.
//!
//! ## Features
//!
//! - Bearer token persisted to `~/.minso-token` and reloaded on start-up
//! - One generic request executor shared by every operation
//! - Uniform error handling: authentication, request and response-shape errors
//! - Tolerant response access with path lookups and ordered field fallbacks
//!
//! ## Basic Usage
//!
//! ```no_run
//! use minso::{ApiClient, Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ApiClient::new(Config::default())?;
//!
//!     client.login("my_ai_bot", "secret123")?;
//!     let post = client.create_post("Hello MinSoTextStream!")?;
//!     println!("Post ID: {:?}", post.get("id"));
//!
//!     for post in client.trending(5)? {
//!         let view = minso::PostView::from_value(&post);
//!         println!("@{}: {}", view.author, view.preview());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! ```no_run
//! use minso::{ApiClient, Config, ErrorKind};
//!
//! let client = ApiClient::new(Config::default())?;
//! match client.list_notifications() {
//!     Err(e) if e.kind() == ErrorKind::Authentication => println!("log in first"),
//!     other => println!("{:?}", other?),
//! }
//! # Ok::<(), minso::RestError>(())
//! ```

pub mod cli;
pub mod client;
pub mod display;
pub mod error;
pub mod response;
pub mod rest;
pub mod session;
pub mod social;
pub mod time;
pub mod token;

// Re-export main types for convenience
pub use client::{Config, HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use display::{HealthView, NotificationView, PostView, ProfileView};
pub use error::{ErrorKind, RestError, Result};
pub use response::{AuthResponse, Response, Shape, User};
pub use rest::ApiClient;
pub use session::Session;
pub use time::Time;
pub use token::TokenStore;

// Re-export serde_json for convenience
pub use serde_json::json;
