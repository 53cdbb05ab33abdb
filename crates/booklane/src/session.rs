// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session of whoever runs the CLI.

use std::sync::{Mutex, PoisonError};

use booklane_core::{Adapter, AdapterType, SessionProvider, User};

/// Logged in as the `--user` given on the command line until `logout`.
pub struct LocalSession {
    user: Mutex<Option<User>>,
}

impl LocalSession {
    pub fn new(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    pub fn logout(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Adapter for LocalSession {
    fn name(&self) -> &str {
        "local"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Session
    }
}

impl SessionProvider for LocalSession {
    fn current_user(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
