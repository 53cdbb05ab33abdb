// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unread-count badge.

use serde::Serialize;

/// `Hidden` at zero unread, otherwise visible with a capped label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BadgeState {
    #[default]
    Hidden,
    Visible { count: usize, label: String },
}

impl BadgeState {
    /// Counts above `cap` render as `"<cap>+"`.
    pub fn new(count: usize, cap: usize) -> Self {
        if count == 0 {
            return BadgeState::Hidden;
        }
        let label = if count > cap {
            format!("{cap}+")
        } else {
            count.to_string()
        };
        BadgeState::Visible { count, label }
    }

    pub fn count(&self) -> usize {
        match self {
            BadgeState::Hidden => 0,
            BadgeState::Visible { count, .. } => *count,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            BadgeState::Hidden => None,
            BadgeState::Visible { label, .. } => Some(label),
        }
    }
}
