// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session provider whose login state tests flip directly.

use std::sync::{Mutex, PoisonError};

use booklane_core::{Adapter, AdapterType, SessionProvider, User};

#[derive(Default)]
pub struct MockSession {
    user: Mutex<Option<User>>,
}

impl MockSession {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged_in(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    pub fn login(&self, user: User) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn logout(&self) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Adapter for MockSession {
    fn name(&self) -> &str {
        "mock-session"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Session
    }
}

impl SessionProvider for MockSession {
    fn current_user(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
