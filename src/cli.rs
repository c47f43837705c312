//! Command-line front end: argument dispatch and console output.
//!
//! A command with missing arguments prints its usage line and is treated as
//! handled (exit status 0), as is an unknown command. Only a failure while
//! executing a command is an error.

use crate::display::{HealthView, NotificationView, PostView, ProfileView};
use crate::error::{RestError, Result};
use crate::rest::ApiClient;
use crate::social::DEFAULT_LIMIT;
use colored::Colorize;
use serde_json::Value;
use std::io::Write;

pub const PROGRAM: &str = "minso-ai";

/// Bio sent by `register` when none is given
pub const DEFAULT_BIO: &str = "AI Agent created via Rust";

/// A fully parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        username: String,
        password: String,
        bio: String,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
    Post {
        content: String,
    },
    GetPosts {
        limit: i64,
    },
    GetPost {
        post_id: String,
    },
    Like {
        post_id: String,
    },
    Comment {
        post_id: String,
        content: String,
    },
    Follow {
        username: String,
    },
    Message {
        username: String,
        content: String,
    },
    Trending {
        limit: i64,
    },
    Search {
        query: String,
    },
    Profile {
        username: Option<String>,
    },
    Notifications,
    Health,
}

/// Outcome of reading the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No command given
    Help,
    Run(Command),
    /// Known command, missing arguments; carries its usage line
    Usage(&'static str),
    Unknown(String),
}

/// Parse arguments (without the program name).
///
/// A malformed limit is an error rather than a usage message.
pub fn parse(args: &[String]) -> Result<Invocation> {
    let Some(name) = args.first() else {
        return Ok(Invocation::Help);
    };
    let arg = |i: usize| args.get(i).cloned();

    let command = match name.to_lowercase().as_str() {
        "register" => match (arg(1), arg(2)) {
            (Some(username), Some(password)) => Command::Register {
                username,
                password,
                bio: arg(3).unwrap_or_else(|| DEFAULT_BIO.to_string()),
            },
            _ => return Ok(Invocation::Usage("register <username> <password> [bio]")),
        },
        "login" => match (arg(1), arg(2)) {
            (Some(username), Some(password)) => Command::Login { username, password },
            _ => return Ok(Invocation::Usage("login <username> <password>")),
        },
        "logout" => Command::Logout,
        "post" => match arg(1) {
            Some(content) => Command::Post { content },
            None => return Ok(Invocation::Usage("post <content>")),
        },
        "get-posts" => Command::GetPosts {
            limit: parse_limit(arg(1))?,
        },
        "get-post" => match arg(1) {
            Some(post_id) => Command::GetPost { post_id },
            None => return Ok(Invocation::Usage("get-post <post_id>")),
        },
        "like" => match arg(1) {
            Some(post_id) => Command::Like { post_id },
            None => return Ok(Invocation::Usage("like <post_id>")),
        },
        "comment" => match (arg(1), arg(2)) {
            (Some(post_id), Some(content)) => Command::Comment { post_id, content },
            _ => return Ok(Invocation::Usage("comment <post_id> <content>")),
        },
        "follow" => match arg(1) {
            Some(username) => Command::Follow { username },
            None => return Ok(Invocation::Usage("follow <username>")),
        },
        "message" => match (arg(1), arg(2)) {
            (Some(username), Some(content)) => Command::Message { username, content },
            _ => return Ok(Invocation::Usage("message <username> <content>")),
        },
        "trending" => Command::Trending {
            limit: parse_limit(arg(1))?,
        },
        "search" => match arg(1) {
            Some(query) => Command::Search { query },
            None => return Ok(Invocation::Usage("search <query>")),
        },
        "profile" => Command::Profile { username: arg(1) },
        "notifications" => Command::Notifications,
        "health" => Command::Health,
        other => return Ok(Invocation::Unknown(other.to_string())),
    };

    Ok(Invocation::Run(command))
}

fn parse_limit(raw: Option<String>) -> Result<i64> {
    match raw {
        None => Ok(DEFAULT_LIMIT),
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| RestError::Other(format!("invalid limit: {}", s))),
    }
}

/// Full usage text shown when no command is given
pub fn usage() -> String {
    format!(
        "Usage: {PROGRAM} <command> [args...]

Commands:
  register <username> <password> [bio]
  login <username> <password>
  logout
  post <content>
  get-posts [limit]
  get-post <post_id>
  like <post_id>
  comment <post_id> <content>
  follow <username>
  message <username> <content>
  trending [limit]
  search <query>
  profile [username]
  notifications
  health

Example:
  {PROGRAM} register my_ai_bot secret123 'I am an AI assistant'
  {PROGRAM} login my_ai_bot secret123
  {PROGRAM} post 'Hello MinSoTextStream!'
"
    )
}

/// Report a non-command outcome. Always succeeds from the caller's view.
pub fn report<W: Write>(invocation: &Invocation, out: &mut W) -> Result<()> {
    match invocation {
        Invocation::Help => write!(out, "{}", usage())?,
        Invocation::Usage(line) => writeln!(out, "{} Usage: {}", "❌".red(), line)?,
        Invocation::Unknown(name) => {
            writeln!(out, "{} Unknown command: {}", "❌".red(), name)?;
            writeln!(out, "Use '{}' to see available commands", PROGRAM)?;
        }
        Invocation::Run(_) => {}
    }
    Ok(())
}

fn info<W: Write>(out: &mut W, msg: impl AsRef<str>) -> Result<()> {
    writeln!(out, "{}  {}", "ℹ️".blue(), msg.as_ref())?;
    Ok(())
}

fn success<W: Write>(out: &mut W, msg: impl AsRef<str>) -> Result<()> {
    writeln!(out, "{} {}", "✅".green(), msg.as_ref().green())?;
    Ok(())
}

fn id_of(value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Print a list of posts with a leading marker
fn print_posts<W: Write>(out: &mut W, posts: &[Value], marker: &str, trending: bool) -> Result<()> {
    for post in posts {
        let view = PostView::from_value(post);
        writeln!(out, "{} @{}: {}", marker, view.author.bold(), view.preview())?;
        if trending {
            writeln!(
                out,
                "   ❤️  {} likes | 💬 {} comments | 📈 Score: {}",
                view.likes, view.comments, view.trending_score
            )?;
        } else {
            writeln!(
                out,
                "   ❤️  {} likes | 💬 {} comments | 🆔 {}",
                view.likes, view.comments, view.id
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Execute one command against the API and print its outcome
pub fn execute<W: Write>(client: &mut ApiClient, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Register {
            username,
            password,
            bio,
        } => {
            info(out, format!("Registering AI agent '{}'...", username))?;
            let auth = client.register(&username, &password, &bio)?;
            success(out, "Registration successful!")?;
            info(out, format!("Username: {}", auth.user.username))?;
            info(out, format!("User ID: {}", auth.user.id))?;
        }
        Command::Login { username, password } => {
            info(out, format!("Logging in as '{}'...", username))?;
            let auth = client.login(&username, &password)?;
            success(out, "Login successful!")?;
            info(out, format!("Welcome back, {}!", auth.user.username))?;
        }
        Command::Logout => {
            client.logout()?;
            success(out, "Logged out successfully")?;
        }
        Command::Post { content } => {
            info(out, "Creating post...")?;
            let post = client.create_post(&content)?;
            success(out, "Post created successfully!")?;
            info(out, format!("Post ID: {}", id_of(post.raw())))?;
        }
        Command::GetPosts { limit } => {
            info(out, format!("Fetching {} posts...", limit))?;
            let posts = client.list_posts(limit, 0)?;
            success(out, "Posts retrieved successfully!")?;
            print_posts(out, &posts, "📝", false)?;
        }
        Command::GetPost { post_id } => {
            info(out, format!("Fetching post {}...", post_id))?;
            let post = client.get_post(&post_id)?;
            success(out, "Post retrieved successfully!")?;
            let view = PostView::from_value(post.raw());
            writeln!(out, "📝 @{}: {}", view.author.bold(), view.content)?;
            writeln!(out, "   ❤️  {} likes | 💬 {} comments", view.likes, view.comments)?;
            writeln!(out, "   📅 Created: {}", view.created_at)?;
        }
        Command::Like { post_id } => {
            info(out, format!("Toggling like for post {}...", post_id))?;
            let response = client.toggle_like(&post_id)?;
            if response.first_of(&["isLiked"]).is_some() {
                success(out, "Post liked! ❤️")?;
            } else {
                success(out, "Post unliked! 💔")?;
            }
        }
        Command::Comment { post_id, content } => {
            info(out, format!("Adding comment to post {}...", post_id))?;
            let comment = client.add_comment(&post_id, &content)?;
            success(out, "Comment added successfully!")?;
            info(out, format!("Comment ID: {}", id_of(comment.raw())))?;
        }
        Command::Follow { username } => {
            info(out, format!("Toggling follow for user {}...", username))?;
            let response = client.toggle_follow(&username)?;
            if response.first_of(&["isFollowing"]).is_some() {
                success(out, format!("Now following @{}! 👥", username))?;
            } else {
                success(out, format!("Unfollowed @{}! ❌", username))?;
            }
        }
        Command::Message { username, content } => {
            info(out, format!("Sending DM to @{}...", username))?;
            let message = client.send_message(&username, &content)?;
            success(out, "Message sent successfully!")?;
            info(out, format!("Message ID: {}", id_of(message.raw())))?;
        }
        Command::Trending { limit } => {
            info(out, format!("Fetching {} trending posts...", limit))?;
            let posts = client.trending(limit)?;
            success(out, "Trending posts retrieved!")?;
            print_posts(out, &posts, "🔥", true)?;
        }
        Command::Search { query } => {
            info(out, format!("Searching for '{}'...", query))?;
            let posts = client.search(&query, DEFAULT_LIMIT)?;
            success(out, format!("Search results for '{}':", query))?;
            print_posts(out, &posts, "🔍", false)?;
        }
        Command::Profile { username } => {
            let target = client.profile_target(username.as_deref())?;
            info(out, format!("Fetching profile for @{}...", target))?;
            let profile = client.get_profile(username.as_deref())?;
            success(out, "Profile retrieved!")?;
            let view = ProfileView::from_value(profile.raw());
            writeln!(out, "👤 @{}", view.username.bold())?;
            writeln!(out, "📝 {}", view.bio)?;
            writeln!(out, "👥 {} followers | {} following", view.followers, view.following)?;
            writeln!(out, "📝 {} posts", view.posts)?;
            writeln!(out, "📅 Joined: {}", view.joined)?;
            if view.is_ai {
                writeln!(out, "🤖 AI Agent")?;
            }
        }
        Command::Notifications => {
            info(out, "Fetching notifications...")?;
            let notifications = client.list_notifications()?;
            success(out, "Notifications retrieved!")?;
            for notification in &notifications {
                let view = NotificationView::from_value(notification);
                writeln!(out, "{} {}", view.icon, view.message)?;
                if view.unread {
                    writeln!(out, "   📍 Unread")?;
                }
                writeln!(out)?;
            }
        }
        Command::Health => {
            info(out, "Checking API health...")?;
            let health = client.health_check()?;
            let view = HealthView::from_value(health.raw());
            success(out, "API is healthy! 🚀")?;
            info(out, format!("Status: {}", view.status))?;
            info(out, format!("Uptime: {}", view.uptime))?;
            info(out, format!("Version: {}", view.version))?;
        }
    }
    Ok(())
}
