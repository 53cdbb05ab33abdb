// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.
//!
//! All problems are collected before returning so a single run reports
//! every bad value at once.

use crate::diagnostic::ConfigError;
use crate::model::{BooklaneConfig, StorageBackend};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
pub fn validate_config(config: &BooklaneConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(
            "app.log_level",
            format!(
                "`{}` is not one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if config.storage.backend == StorageBackend::Sqlite
        && config.storage.database_path.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "storage.database_path",
            "must not be empty when backend is sqlite",
        ));
    }

    let n = &config.notifications;
    if n.toast_timeout_ms == 0 {
        errors.push(ConfigError::validation(
            "notifications.toast_timeout_ms",
            "must be greater than zero",
        ));
    }
    if n.toast_leave_ms >= n.toast_timeout_ms && n.toast_timeout_ms > 0 {
        errors.push(ConfigError::validation(
            "notifications.toast_leave_ms",
            format!(
                "must be shorter than toast_timeout_ms ({}), got {}",
                n.toast_timeout_ms, n.toast_leave_ms
            ),
        ));
    }
    if n.dropdown_limit == 0 {
        errors.push(ConfigError::validation(
            "notifications.dropdown_limit",
            "must be at least 1",
        ));
    }
    if n.badge_cap == 0 {
        errors.push(ConfigError::validation(
            "notifications.badge_cap",
            "must be at least 1",
        ));
    }

    let sim = &config.simulator;
    if !(0.0..=1.0).contains(&sim.probability) {
        errors.push(ConfigError::validation(
            "simulator.probability",
            format!("must be between 0.0 and 1.0, got {}", sim.probability),
        ));
    }
    if sim.interval_secs == 0 {
        errors.push(ConfigError::validation(
            "simulator.interval_secs",
            "must be greater than zero",
        ));
    }

    match url::Url::parse(&config.handoff.base_url) {
        Ok(url) if url.cannot_be_a_base() => errors.push(ConfigError::validation(
            "handoff.base_url",
            format!("`{}` cannot carry a path", config.handoff.base_url),
        )),
        Ok(_) => {}
        Err(e) => errors.push(ConfigError::validation(
            "handoff.base_url",
            format!("`{}` is not a valid URL: {e}", config.handoff.base_url),
        )),
    }
    if config.handoff.app_name.trim().is_empty() {
        errors.push(ConfigError::validation(
            "handoff.app_name",
            "must not be empty",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
