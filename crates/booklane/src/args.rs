// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line value parsers for users and items.

use std::str::FromStr;

use booklane_core::{ItemRef, Participant, User};

/// `id` or `id:Display Name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserArg(pub User);

impl FromStr for UserArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, name) = match s.split_once(':') {
            Some((id, name)) => (id.trim(), name.trim()),
            None => (s.trim(), s.trim()),
        };
        if id.is_empty() {
            return Err(format!("`{s}`: user id must not be empty"));
        }
        let name = if name.is_empty() { id } else { name };
        Ok(UserArg(User::new(id, name)))
    }
}

impl UserArg {
    pub fn participant(&self) -> Participant {
        Participant::from(&self.0)
    }
}

/// `id:Title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg(pub ItemRef);

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((id, title)) = s.split_once(':') else {
            return Err(format!("`{s}`: expected <item-id>:<title>"));
        };
        let (id, title) = (id.trim(), title.trim());
        if id.is_empty() || title.is_empty() {
            return Err(format!("`{s}`: item id and title must not be empty"));
        }
        Ok(ItemArg(ItemRef::new(id, title)))
    }
}
