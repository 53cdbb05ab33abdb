// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Toast lifecycle: `entering -> visible -> leaving -> removed`.
//!
//! Each toast is driven by one task that owns its timers. An explicit
//! dismissal only cancels the toast's token; the task itself performs the
//! `leaving` transition and the removal, so both happen exactly once
//! whichever of timeout or dismissal wins.

use std::time::Duration;

use booklane_config::NotificationConfig;
use serde::Serialize;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

impl ToastPhase {
    /// Whether a dismissal can still move this toast to `leaving`.
    pub fn is_dismissable(self) -> bool {
        matches!(self, ToastPhase::Entering | ToastPhase::Visible)
    }
}

/// Delays for one toast, all measured on the tokio clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    /// Cosmetic delay before `entering` becomes `visible`.
    pub enter: Duration,
    /// Lifetime from creation until the automatic `leaving`.
    pub timeout: Duration,
    /// Exit animation between `leaving` and removal.
    pub leave: Duration,
}

impl From<&NotificationConfig> for ToastTiming {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            enter: config.toast_enter(),
            timeout: config.toast_timeout(),
            leave: config.toast_leave(),
        }
    }
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self::from(&NotificationConfig::default())
    }
}

/// Callbacks a toast task reports its transitions through.
pub(crate) trait ToastHost: Send + Sync + 'static {
    fn promote(&self, id: &booklane_core::NotificationId);
    /// Returns `false` if the toast is already leaving or gone.
    fn begin_leaving(&self, id: &booklane_core::NotificationId) -> bool;
    fn detach(&self, id: &booklane_core::NotificationId);
}

/// Drive one toast from creation to removal.
///
/// `deadline` is fixed when the toast is created, so however late the task
/// first runs the toast never outlives `timing.timeout`.
pub(crate) async fn run_toast<H: ToastHost>(
    host: std::sync::Arc<H>,
    id: booklane_core::NotificationId,
    timing: ToastTiming,
    deadline: Instant,
    close: CancellationToken,
) {
    tokio::select! {
        _ = sleep(timing.enter) => host.promote(&id),
        _ = close.cancelled() => {}
    }
    tokio::select! {
        _ = sleep_until(deadline) => {}
        _ = close.cancelled() => {}
    }

    if !host.begin_leaving(&id) {
        return;
    }
    sleep(timing.leave).await;
    host.detach(&id);
}
