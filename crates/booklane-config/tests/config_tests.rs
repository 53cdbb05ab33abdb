// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Booklane configuration system.

use booklane_config::diagnostic::ConfigError;
use booklane_config::{StorageBackend, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[app]
name = "shelfswap"
log_level = "debug"

[storage]
backend = "memory"
database_path = "/tmp/booklane-test.db"
wal_mode = false

[notifications]
toast_timeout_ms = 4000
toast_enter_ms = 10
toast_leave_ms = 250
dropdown_limit = 7
badge_cap = 99

[simulator]
enabled = false
interval_secs = 5
probability = 1.0
seed = 42

[handoff]
base_url = "https://chat.example.com/send"
app_name = "ShelfSwap"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "shelfswap");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert!(!config.storage.wal_mode);
    assert_eq!(config.notifications.toast_timeout_ms, 4000);
    assert_eq!(config.notifications.dropdown_limit, 7);
    assert_eq!(config.notifications.badge_cap, 99);
    assert!(!config.simulator.enabled);
    assert_eq!(config.simulator.seed, Some(42));
    assert_eq!(config.handoff.app_name, "ShelfSwap");
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.notifications.toast_timeout_ms, 5000);
    assert_eq!(config.simulator.interval_secs, 30);
    assert_eq!(config.simulator.probability, 0.3);
}

#[test]
fn typo_produces_suggestion() {
    let errors = load_and_validate_str("[notifications]\nbadge_cpa = 3\n")
        .expect_err("unknown key should fail");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "badge_cpa");
            assert_eq!(suggestion.as_deref(), Some("badge_cap"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[telemetry]\nenabled = true\n")
        .expect_err("unknown section should fail");
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[notifications]\ndropdown_limit = \"five\"\n")
        .expect_err("string for integer should fail");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => {
            assert!(key.ends_with("dropdown_limit"), "key was {key}");
        }
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

#[test]
fn semantic_errors_surface_through_load_and_validate() {
    let errors = load_and_validate_str("[simulator]\nprobability = 2.0\n")
        .expect_err("probability above one should fail");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("simulator.probability"));
}

#[test]
fn config_errors_render_without_panicking() {
    let errors = load_and_validate_str("[app]\nnmae = \"x\"\n").expect_err("typo");
    booklane_config::render_errors(&errors);
}
