// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for command results.
//!
//! `--json` prints structured output for scripting. Otherwise output is
//! human-readable, colored only when stdout is a TTY and `--plain` is off.

use std::io::IsTerminal;

use booklane_messaging::{ConversationSummary, ThreadView};
use booklane_notify::{BadgeState, NotificationView};
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    color: bool,
}

impl Output {
    pub fn new(json: bool, plain: bool) -> Self {
        Self {
            json,
            color: !plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        );
    }

    /// A one-line success note.
    pub fn ok(&self, text: &str) {
        if self.color {
            println!("{} {text}", "✓".green());
        } else {
            println!("[OK] {text}");
        }
    }

    pub fn error(&self, text: &str) {
        if self.color {
            eprintln!("{} {text}", "error:".red().bold());
        } else {
            eprintln!("error: {text}");
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn inbox(&self, rows: &[ConversationSummary]) {
        if rows.is_empty() {
            println!("  No conversations yet.");
            return;
        }
        for row in rows {
            let marker = if row.unread { "●" } else { " " };
            let marker = if self.color {
                marker.blue().to_string()
            } else {
                marker.to_string()
            };
            let preview = row.preview.as_deref().unwrap_or("(no messages)");
            let header = format!("{} · {}", row.counterpart_name, row.item_title);
            let header = if row.unread {
                self.strong(&header)
            } else {
                header
            };
            println!("{marker} {header}  {}", self.dim(row.id.as_str()));
            println!("    {preview}");
        }
    }

    pub fn thread(&self, thread: &ThreadView) {
        println!(
            "  {} with {}",
            self.strong(&thread.item.title),
            thread.counterpart.display_name
        );
        println!("  {}", "-".repeat(35));
        for message in &thread.messages {
            let stamp = message.created_at.format("%Y-%m-%d %H:%M").to_string();
            let receipt = match (message.is_own, message.seen_by_counterpart) {
                (true, true) => " ✓✓",
                (true, false) => " ✓",
                (false, _) => "",
            };
            println!(
                "  {} {}{}",
                self.dim(&stamp),
                self.strong(&message.sender_name),
                self.dim(receipt)
            );
            println!("    {}", message.body);
        }
    }

    pub fn badge(&self, badge: &BadgeState) {
        match badge.label() {
            Some(label) if self.color => println!("  🔔 {}", label.white().on_red()),
            Some(label) => println!("  [bell] {label} unread"),
            None => println!("  [bell] all caught up"),
        }
    }

    pub fn notifications(&self, rows: &[NotificationView]) {
        if rows.is_empty() {
            println!("  No notifications.");
            return;
        }
        for row in rows {
            self.notification(row);
        }
    }

    pub fn notification(&self, row: &NotificationView) {
        let state = if row.read { " " } else { "●" };
        let state = if self.color {
            state.blue().to_string()
        } else {
            state.to_string()
        };
        let message = if row.read {
            row.message.clone()
        } else {
            self.strong(&row.message)
        };
        println!(
            "{state} {} {message}  {}",
            row.icon,
            self.dim(&format!("{} · {}", row.age, row.id))
        );
    }
}
