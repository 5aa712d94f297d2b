//! End-to-end smoke tests against a throwaway SQLite file

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn postline(db_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("postline").unwrap();
    cmd.env("DATABASE_URL", db_url).env_remove("RUST_LOG");
    cmd
}

fn sqlite_url(dir: &TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("postline.db").display())
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("failed to run postline");
    assert!(
        output.status.success(),
        "postline failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("postline").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("post"));
}

#[test]
fn test_post_list_help() {
    let mut cmd = Command::cargo_bin("postline").unwrap();
    cmd.arg("post").arg("list").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Maximum number of posts"));
}

#[test]
fn test_user_and_posts_round_trip() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);

    let migrated = json_stdout(postline(&url).arg("migrate"));
    assert_eq!(migrated["migrated"], true);

    let user = json_stdout(postline(&url).args(["user", "add", "alice"]));
    let user_id = user["id"].as_str().unwrap().to_string();
    assert_eq!(user["name"], "alice");

    for title in ["p1", "p2"] {
        let post = json_stdout(postline(&url).args(["post", "add", "--user", &user_id, title, "body"]));
        assert_eq!(post["user_id"], user_id.as_str());
    }

    let posts = json_stdout(postline(&url).args(["post", "by-user", &user_id]));
    let titles: Vec<_> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["p2", "p1"]);

    let listed = json_stdout(postline(&url).args(["post", "list", "--limit", "1"]));
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["user"]["name"], "alice");

    let shown = json_stdout(postline(&url).args(["user", "show", &user_id]));
    assert_eq!(shown["posts"].as_array().unwrap().len(), 2);
}

#[test]
fn test_user_without_posts_shows_empty_array() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    json_stdout(postline(&url).arg("migrate"));

    let user = json_stdout(postline(&url).args(["user", "add", "quiet"]));
    let shown = json_stdout(postline(&url).args(["user", "show", user["id"].as_str().unwrap()]));
    assert_eq!(shown["posts"], Value::Array(Vec::new()));
}

#[test]
fn test_unknown_user_fails() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    json_stdout(postline(&url).arg("migrate"));

    postline(&url)
        .args(["user", "show", "01890a5d-ac96-774b-bcce-b302099a8057"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_health_reports_connected() {
    let dir = TempDir::new().unwrap();
    let health = json_stdout(postline(&sqlite_url(&dir)).arg("health"));
    assert_eq!(health["mysql_connected"], true);
    assert_eq!(health["api_server_started"], false);
}
