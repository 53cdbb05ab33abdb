// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./booklane.toml` > `~/.config/booklane/booklane.toml` > `/etc/booklane/booklane.toml`
//! with environment variable overrides via `BOOKLANE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BooklaneConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/booklane/booklane.toml";

/// Local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "booklane.toml";

/// The per-user XDG configuration file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("booklane").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/booklane/booklane.toml` (system-wide)
/// 3. `~/.config/booklane/booklane.toml` (user XDG config)
/// 4. `./booklane.toml` (local directory)
/// 5. `BOOKLANE_*` environment variables
pub fn load_config() -> Result<BooklaneConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BooklaneConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BooklaneConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BooklaneConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BooklaneConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BooklaneConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: key names contain
/// underscores, so `BOOKLANE_NOTIFICATIONS_TOAST_TIMEOUT_MS` must map to
/// `notifications.toast_timeout_ms`, not `notifications.toast.timeout.ms`.
fn env_provider() -> Env {
    Env::prefixed("BOOKLANE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: BOOKLANE_HANDOFF_APP_NAME -> "handoff_app_name"
        let key_str = key.as_str();
        for section in CONFIG_SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}

/// Top-level sections that environment variables may target.
const CONFIG_SECTIONS: [&str; 5] = ["app", "storage", "notifications", "simulator", "handoff"];
