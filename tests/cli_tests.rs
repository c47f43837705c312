use assert_cmd::prelude::*;
use minso::cli::{self, Command, Invocation};
use minso::{ApiClient, Config, HttpRequest, HttpResponse, TokenStore, Transport};
use serde_json::json;
use std::cell::Cell;
use std::process;
use std::rc::Rc;
use tempfile::TempDir;

/// Always answers with the same body and counts calls
struct Fixed {
    body: serde_json::Value,
    calls: Rc<Cell<usize>>,
}

impl Transport for Fixed {
    fn send(&self, _request: HttpRequest) -> minso::Result<HttpResponse> {
        self.calls.set(self.calls.get() + 1);
        Ok(HttpResponse {
            status: 200,
            body: serde_json::to_vec(&self.body).unwrap(),
        })
    }
}

fn run(dir: &TempDir, body: serde_json::Value, command: Command) -> (minso::Result<()>, String, usize) {
    colored::control::set_override(false);

    let calls = Rc::new(Cell::new(0));
    let transport = Fixed {
        body,
        calls: calls.clone(),
    };
    let store = TokenStore::new(dir.path().join("token"));
    let mut client = ApiClient::with_transport(Config::default(), store, Box::new(transport)).unwrap();

    let mut out = Vec::new();
    let result = cli::execute(&mut client, command, &mut out);
    (result, String::from_utf8(out).unwrap(), calls.get())
}

#[test]
fn test_get_posts_output() {
    let dir = TempDir::new().unwrap();
    let body = json!([
        {"id": "p1", "content": "x".repeat(150), "author": {"username": "alice"}, "likeCount": 3},
        {"id": "p2", "content": "short", "username": "bob", "likes": 1, "comments": 2}
    ]);

    let (result, out, calls) = run(&dir, body, Command::GetPosts { limit: 2 });
    result.unwrap();
    assert_eq!(calls, 1);
    assert!(out.contains(&format!("📝 @alice: {}...", "x".repeat(100))));
    assert!(out.contains("3 likes | 💬 0 comments | 🆔 p1"));
    assert!(out.contains("📝 @bob: short"));
    assert!(out.contains("1 likes | 💬 2 comments | 🆔 p2"));
}

#[test]
fn test_post_without_login_fails_without_request() {
    let dir = TempDir::new().unwrap();
    let (result, _out, calls) = run(
        &dir,
        json!({"id": "p1"}),
        Command::Post {
            content: "hello".to_string(),
        },
    );
    assert!(result.is_err());
    assert_eq!(calls, 0);
}

#[test]
fn test_health_output() {
    let dir = TempDir::new().unwrap();
    let (result, out, _) = run(&dir, json!({"status": "ok", "version": "1.2.0"}), Command::Health);
    result.unwrap();
    assert!(out.contains("API is healthy!"));
    assert!(out.contains("Status: ok"));
    assert!(out.contains("Uptime: N/A"));
    assert!(out.contains("Version: 1.2.0"));
}

#[test]
fn test_profile_output() {
    let dir = TempDir::new().unwrap();
    let body = json!({
        "id": "u1",
        "username": "bot1",
        "bio": "beep boop",
        "followersCount": 4,
        "followingCount": 1,
        "postsCount": 7,
        "createdAt": "2024-01-02T03:04:05Z",
        "isAI": true
    });
    let (result, out, _) = run(
        &dir,
        body,
        Command::Profile {
            username: Some("bot1".to_string()),
        },
    );
    result.unwrap();
    assert!(out.contains("Fetching profile for @bot1..."));
    assert!(out.contains("👤 @bot1"));
    assert!(out.contains("4 followers | 1 following"));
    assert!(out.contains("📅 Joined: 2024-01-02 03:04"));
    assert!(out.contains("🤖 AI Agent"));
}

#[test]
fn test_missing_arguments_are_not_errors() {
    let args: Vec<String> = vec!["follow".to_string()];
    let invocation = cli::parse(&args).unwrap();
    assert_eq!(invocation, Invocation::Usage("follow <username>"));

    let mut out = Vec::new();
    cli::report(&invocation, &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("follow <username>"));
}

/// The binary with `HOME` pointed at an empty directory, so no token is found
fn minso_ai(home: &TempDir, args: &[&str]) -> process::Command {
    let mut cmd = process::Command::new(assert_cmd::cargo::cargo_bin!("minso-ai"));
    cmd.env("HOME", home.path()).env_remove("RUST_LOG").args(args);
    cmd
}

#[test]
fn test_binary_usage_paths_exit_zero() {
    let home = TempDir::new().unwrap();

    let assert = minso_ai(&home, &[]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("Usage: minso-ai <command>"));

    let assert = minso_ai(&home, &["like"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("Usage: like <post_id>"));

    let assert = minso_ai(&home, &["dance"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("Unknown command: dance"));
}

#[test]
fn test_binary_execution_failures_exit_one() {
    let home = TempDir::new().unwrap();

    let cases: [(&[&str], &str); 3] = [
        (&["get-posts", "abc"], "invalid limit: abc"),
        (&["post", "hi"], "authentication required"),
        (&["profile"], "not logged in"),
    ];

    for (args, message) in cases {
        let assert = minso_ai(&home, args).assert().failure().code(1);
        let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
        assert!(stderr.contains("❌ Error:"), "{:?}: {}", args, stderr);
        assert!(stderr.contains(message), "{:?}: {}", args, stderr);
    }

    // nothing was persisted along the way
    assert!(!home.path().join(".minso-token").exists());
}
