//! Read-only views of API records for console presentation.
//!
//! Nothing here mutates the fetched value; views borrow from it and copy
//! out what they need.

use crate::response::{first_present, lookup};
use crate::time::display_timestamp;
use serde_json::Value;

/// Posts longer than this are cut when shown in lists
pub const CONTENT_PREVIEW_CHARS: usize = 100;

const UNKNOWN_AUTHOR: &str = "unknown";
const NOT_AVAILABLE: &str = "N/A";

/// Display form of a post
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub id: String,
    pub author: String,
    /// Full text; use [`PostView::preview`] for lists
    pub content: String,
    pub likes: u64,
    pub comments: u64,
    pub trending_score: String,
    pub created_at: String,
}

impl PostView {
    pub fn from_value(post: &Value) -> Self {
        PostView {
            id: field(post, "id").unwrap_or_default(),
            author: text(post, &["username", "author/username"])
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            content: field(post, "content").unwrap_or_default(),
            likes: count(post, &["likes", "likeCount"]),
            comments: count(post, &["comments", "commentCount"]),
            trending_score: field(post, "trendingScore").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            created_at: lookup(post, "createdAt")
                .map(display_timestamp)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    /// Content cut to [`CONTENT_PREVIEW_CHARS`] characters plus `...`
    pub fn preview(&self) -> String {
        truncate(&self.content, CONTENT_PREVIEW_CHARS)
    }
}

/// Display form of a user profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub username: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
    pub joined: String,
    pub is_ai: bool,
}

impl ProfileView {
    pub fn from_value(profile: &Value) -> Self {
        ProfileView {
            username: field(profile, "username").unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            bio: field(profile, "bio").unwrap_or_default(),
            followers: count(profile, &["followersCount", "followers"]),
            following: count(profile, &["followingCount", "following"]),
            posts: count(profile, &["postsCount", "posts"]),
            joined: lookup(profile, "createdAt")
                .map(display_timestamp)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            is_ai: lookup(profile, "isAI").and_then(Value::as_bool).unwrap_or(false),
        }
    }
}

/// Display form of a notification
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationView {
    pub icon: &'static str,
    pub message: String,
    pub unread: bool,
}

impl NotificationView {
    pub fn from_value(notification: &Value) -> Self {
        let kind = lookup(notification, "type").and_then(Value::as_str).unwrap_or_default();
        NotificationView {
            icon: notification_icon(kind),
            message: field(notification, "message").unwrap_or_default(),
            unread: first_present(notification, &["read"]).is_none(),
        }
    }
}

/// Display form of the health endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct HealthView {
    pub status: String,
    pub uptime: String,
    pub version: String,
}

impl HealthView {
    pub fn from_value(health: &Value) -> Self {
        HealthView {
            status: field(health, "status").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            uptime: field(health, "uptime").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            version: field(health, "version").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

pub fn notification_icon(kind: &str) -> &'static str {
    match kind {
        "like" => "❤️",
        "comment" => "💬",
        "follow" => "👥",
        "mention" => "📢",
        _ => "🔔",
    }
}

/// Cut `s` to at most `max` characters, appending `...` when anything was dropped
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First non-blank candidate rendered as text
fn text(value: &Value, candidates: &[&str]) -> Option<String> {
    first_present(value, candidates).map(render)
}

/// Single key rendered as text; only a missing key or null is absent, so
/// `0` and `""` are shown as they are
fn field(value: &Value, key: &str) -> Option<String> {
    lookup(value, key).filter(|v| !v.is_null()).map(render)
}

/// First non-blank candidate as a count. Arrays count their elements.
fn count(value: &Value, candidates: &[&str]) -> u64 {
    match first_present(value, candidates) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Some(Value::Array(items)) => items.len() as u64,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_view_fallbacks() {
        let long = "x".repeat(150);
        let post = json!({
            "id": "p1",
            "content": long,
            "author": {"username": "alice"},
            "likeCount": 3
        });
        let view = PostView::from_value(&post);

        assert_eq!(view.author, "alice");
        assert_eq!(view.likes, 3);
        assert_eq!(view.comments, 0);
        assert_eq!(view.preview(), format!("{}...", "x".repeat(100)));
        assert_eq!(view.content.len(), 150);
        // the source record is untouched
        assert_eq!(post["content"].as_str().unwrap().len(), 150);
    }

    #[test]
    fn test_post_view_prefers_flat_fields() {
        let post = json!({
            "id": 7,
            "content": "short",
            "username": "bob",
            "author": {"username": "alice"},
            "likes": 5,
            "likeCount": 3,
            "comments": [{"id": "c1"}, {"id": "c2"}],
            "trendingScore": 12.5,
            "createdAt": "2024-03-05T14:07:09Z"
        });
        let view = PostView::from_value(&post);

        assert_eq!(view.id, "7");
        assert_eq!(view.author, "bob");
        assert_eq!(view.likes, 5);
        assert_eq!(view.comments, 2);
        assert_eq!(view.preview(), "short");
        assert_eq!(view.trending_score, "12.5");
        assert_eq!(view.created_at, "2024-03-05 14:07");
    }

    #[test]
    fn test_post_view_unknown_author() {
        let view = PostView::from_value(&json!({"id": "p2", "content": "hey"}));
        assert_eq!(view.author, "unknown");
        assert_eq!(view.trending_score, "N/A");
        assert_eq!(view.created_at, "N/A");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("héllo", 2), "hé...");
        assert_eq!(truncate("héllo", 5), "héllo");
        assert_eq!(truncate("", 100), "");
        let exact = "y".repeat(100);
        assert_eq!(truncate(&exact, 100), exact);
    }

    #[test]
    fn test_profile_view() {
        let view = ProfileView::from_value(&json!({
            "id": "u1",
            "username": "bot1",
            "bio": "beep",
            "followersCount": 4,
            "followingCount": 2,
            "postsCount": 9,
            "createdAt": "2024-01-02T03:04:05Z",
            "isAI": true
        }));
        assert_eq!(view.username, "bot1");
        assert_eq!(view.followers, 4);
        assert_eq!(view.following, 2);
        assert_eq!(view.posts, 9);
        assert_eq!(view.joined, "2024-01-02 03:04");
        assert!(view.is_ai);
    }

    #[test]
    fn test_notification_view() {
        let read = NotificationView::from_value(&json!({"type": "follow", "message": "bob followed you", "read": true}));
        assert_eq!(read.icon, "👥");
        assert!(!read.unread);

        let unread = NotificationView::from_value(&json!({"type": "poke", "message": "?"}));
        assert_eq!(unread.icon, "🔔");
        assert!(unread.unread);
    }

    #[test]
    fn test_single_key_zero_is_shown() {
        let post = PostView::from_value(&json!({"id": 0, "content": "c", "trendingScore": 0}));
        assert_eq!(post.id, "0");
        assert_eq!(post.trending_score, "0");

        let health = HealthView::from_value(&json!({"status": "ok", "uptime": 0, "version": null}));
        assert_eq!(health.uptime, "0");
        assert_eq!(health.version, "N/A");
    }

    #[test]
    fn test_health_view_defaults() {
        let view = HealthView::from_value(&json!({"status": "ok"}));
        assert_eq!(view.status, "ok");
        assert_eq!(view.uptime, "N/A");
        assert_eq!(view.version, "N/A");
    }
}
