// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end runs of the `booklane` binary against a scratch database.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn booklane(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_booklane"))
        .args(args)
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("BOOKLANE_STORAGE_DATABASE_PATH", home.join("booklane.db"))
        .env("BOOKLANE_STORAGE_BACKEND", "sqlite")
        .env("RUST_LOG", "off")
        .output()
        .expect("binary runs")
}

fn json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let out = booklane(home, &full);
    assert!(
        out.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout is json")
}

fn send(home: &Path, from: &str, to: &str, body: &str) -> Value {
    json(
        home,
        &["send", "--from", from, "--to", to, "--item", "book-42:Dune", body],
    )
}

#[test]
fn conversation_survives_between_runs() {
    let home = TempDir::new().unwrap();
    let first = send(home.path(), "alice:Alice", "bob:Bob", "Is it still available?");
    let second = send(home.path(), "bob:Bob", "alice:Alice", "Yes!");
    assert_eq!(first["conversation_id"], second["conversation_id"]);
    let id = first["conversation_id"].as_str().unwrap().to_string();

    let inbox = json(home.path(), &["inbox", "--user", "alice"]);
    let rows = inbox.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["unread"], true);
    assert_eq!(rows[0]["preview"], "Yes!");

    let thread = json(home.path(), &["thread", "--user", "alice", &id]);
    assert_eq!(thread["messages"].as_array().unwrap().len(), 2);

    let inbox = json(home.path(), &["inbox", "--user", "alice"]);
    assert_eq!(inbox[0]["unread"], false);
}

#[test]
fn inbox_header_counts_unread_conversations() {
    let home = TempDir::new().unwrap();
    send(home.path(), "bob:Bob", "alice:Alice", "Still have Dune?");
    json(
        home.path(),
        &["send", "--from", "carol:Carol", "--to", "alice:Alice", "--item", "book-7:Emma", "Hi"],
    );

    let out = booklane(home.path(), &["--plain", "inbox", "--user", "alice"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Inbox (2 unread)"));

    let out = booklane(home.path(), &["--plain", "inbox", "--user", "bob"]);
    assert!(String::from_utf8_lossy(&out.stdout).contains("Inbox (0 unread)"));
}

#[test]
fn sending_notifies_recipient() {
    let home = TempDir::new().unwrap();
    let sent = send(home.path(), "alice:Alice", "bob:Bob", "Hi");
    let id = sent["conversation_id"].as_str().unwrap();

    let listing = json(home.path(), &["notifications", "--user", "bob", "--filter", "unread"]);
    let items = listing["notifications"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "message");
    assert_eq!(listing["badge"]["count"], 1);

    let note = items[0]["id"].as_str().unwrap();
    let read = json(home.path(), &["read", "--user", "bob", note]);
    assert_eq!(read["navigate"]["destination"], format!("/messages/{id}"));

    let listing = json(home.path(), &["notifications", "--user", "bob", "--filter", "unread"]);
    assert!(listing["notifications"].as_array().unwrap().is_empty());
}

#[test]
fn dropdown_marks_seen_and_read_all_clears_badge() {
    let home = TempDir::new().unwrap();
    for i in 0..7 {
        let message = format!("update {i}");
        json(home.path(), &["notify", "--user", "carol", &message]);
    }

    let open = json(home.path(), &["notifications", "--user", "carol", "--open"]);
    assert_eq!(open["notifications"].as_array().unwrap().len(), 5);
    assert_eq!(open["notifications"][0]["message"], "update 6");
    assert_eq!(open["badge"]["count"], 7);

    let all = json(home.path(), &["notifications", "--user", "carol"]);
    assert!(
        all["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .all(|n| n["seen"] == true && n["read"] == false)
    );

    let done = json(home.path(), &["read", "--user", "carol", "--all"]);
    assert_eq!(done["all_read"]["marked"], 7);
    let after = json(home.path(), &["notifications", "--user", "carol"]);
    assert_eq!(after["badge"]["state"], "hidden");
}

#[test]
fn handoff_remembers_the_handle() {
    let home = TempDir::new().unwrap();
    let sent = send(home.path(), "alice:Alice", "bob:Bob", "Hi");
    let id = sent["conversation_id"].as_str().unwrap();

    let missing = booklane(home.path(), &["handoff", "--user", "alice", id]);
    assert!(!missing.status.success());

    let first = json(
        home.path(),
        &["handoff", "--user", "alice", id, "--handle", "+61 400 111 222"],
    );
    assert!(
        first["link"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/61400111222?text=")
    );

    let again = json(home.path(), &["handoff", "--user", "alice", id]);
    assert_eq!(first["link"], again["link"]);
}

#[test]
fn outsider_cannot_open_thread() {
    let home = TempDir::new().unwrap();
    let sent = send(home.path(), "alice:Alice", "bob:Bob", "Hi");
    let id = sent["conversation_id"].as_str().unwrap();

    let out = booklane(home.path(), &["--plain", "thread", "--user", "carol", id]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}

#[test]
fn empty_message_is_rejected() {
    let home = TempDir::new().unwrap();
    let out = booklane(
        home.path(),
        &["send", "--from", "alice", "--to", "bob", "--item", "book-1:Emma", "   "],
    );
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn config_typo_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("booklane.toml"),
        "[notifications]\nbadge_cpa = 3\n",
    )
    .unwrap();

    let out = booklane(home.path(), &["inbox", "--user", "alice"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("badge_cap"));
}

#[test]
fn plain_text_output() {
    let home = TempDir::new().unwrap();
    let out = booklane(home.path(), &["--plain", "inbox", "--user", "alice"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("No conversations yet."));
}
