// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared cast: Alice sells "Dune" (book-42), Bob wants it.

use booklane_core::{ItemRef, Participant, User};

pub fn alice() -> User {
    User::new("alice", "Alice")
}

pub fn bob() -> User {
    User::new("bob", "Bob")
}

pub fn carol() -> User {
    User::new("carol", "Carol")
}

pub fn dune() -> ItemRef {
    ItemRef::new("book-42", "Dune")
}

pub fn emma() -> ItemRef {
    ItemRef::new("book-7", "Emma")
}

pub fn participant(user: &User) -> Participant {
    Participant::from(user)
}
