// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Booklane engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Booklane configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BooklaneConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Persistent store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Badge, dropdown and toast settings.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Simulated event source settings.
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// External messaging handoff settings.
    #[serde(default)]
    pub handoff: HandoffConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the marketplace.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "booklane".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which persistent store implementation backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map; everything is lost on exit.
    Memory,
    /// SQLite key-value table on disk.
    #[default]
    Sqlite,
}

/// Persistent store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("booklane").join("booklane.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("booklane.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Notification surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// Toast lifetime measured from creation, in milliseconds.
    #[serde(default = "default_toast_timeout_ms")]
    pub toast_timeout_ms: u64,

    /// Cosmetic delay before a new toast becomes visible, in milliseconds.
    #[serde(default = "default_toast_enter_ms")]
    pub toast_enter_ms: u64,

    /// Exit animation delay between leaving and removal, in milliseconds.
    #[serde(default = "default_toast_leave_ms")]
    pub toast_leave_ms: u64,

    /// How many notifications the dropdown renders.
    #[serde(default = "default_dropdown_limit")]
    pub dropdown_limit: usize,

    /// Counts above this render as "<cap>+" on the badge.
    #[serde(default = "default_badge_cap")]
    pub badge_cap: usize,
}

impl NotificationConfig {
    pub fn toast_timeout(&self) -> Duration {
        Duration::from_millis(self.toast_timeout_ms)
    }

    pub fn toast_enter(&self) -> Duration {
        Duration::from_millis(self.toast_enter_ms)
    }

    pub fn toast_leave(&self) -> Duration {
        Duration::from_millis(self.toast_leave_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_timeout_ms: default_toast_timeout_ms(),
            toast_enter_ms: default_toast_enter_ms(),
            toast_leave_ms: default_toast_leave_ms(),
            dropdown_limit: default_dropdown_limit(),
            badge_cap: default_badge_cap(),
        }
    }
}

fn default_toast_timeout_ms() -> u64 {
    5000
}

fn default_toast_enter_ms() -> u64 {
    20
}

fn default_toast_leave_ms() -> u64 {
    300
}

fn default_dropdown_limit() -> usize {
    5
}

fn default_badge_cap() -> usize {
    9
}

/// Simulated event source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Whether the demo session runs the simulator at all.
    #[serde(default = "default_simulator_enabled")]
    pub enabled: bool,

    /// Tick period in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Chance (0.0-1.0) that a tick produces a notification.
    #[serde(default = "default_probability")]
    pub probability: f64,

    /// Fixed RNG seed for reproducible runs. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_simulator_enabled(),
            interval_secs: default_interval_secs(),
            probability: default_probability(),
            seed: None,
        }
    }
}

fn default_simulator_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    30
}

fn default_probability() -> f64 {
    0.3
}

/// External messaging handoff configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HandoffConfig {
    /// Base URL of the click-to-chat endpoint.
    #[serde(default = "default_handoff_base_url")]
    pub base_url: String,

    /// Marketplace name quoted in the handoff message.
    #[serde(default = "default_handoff_app_name")]
    pub app_name: String,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            base_url: default_handoff_base_url(),
            app_name: default_handoff_app_name(),
        }
    }
}

fn default_handoff_base_url() -> String {
    "https://wa.me".to_string()
}

fn default_handoff_app_name() -> String {
    "Booklane".to_string()
}
