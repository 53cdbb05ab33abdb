// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logical store keys.

use booklane_core::UserId;

/// Key holding every conversation, for all users.
pub const CONVERSATIONS_KEY: &str = "conversations";

const NOTIFICATIONS_PREFIX: &str = "notifications_";

/// Key holding one user's notification list.
pub fn notifications_key(user: &UserId) -> String {
    format!("{NOTIFICATIONS_PREFIX}{user}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_keys_are_per_user() {
        assert_eq!(notifications_key(&UserId::from("alice")), "notifications_alice");
        assert_ne!(
            notifications_key(&UserId::from("alice")),
            notifications_key(&UserId::from("bob"))
        );
    }
}
