// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booklane - conversations and notifications for a book marketplace.
//!
//! This is the command-line front end over the Booklane engine.

mod alerts;
mod args;
mod chat;
mod demo;
mod engine;
mod output;
mod session;

use std::path::PathBuf;

use booklane_core::{
    BooklaneError, ConversationId, NotificationFilter, NotificationId, NotificationKind,
};
use clap::{Parser, Subcommand};

use crate::args::{ItemArg, UserArg};
use crate::engine::Engine;
use crate::output::Output;

/// Booklane - conversations and notifications for a book marketplace.
#[derive(Parser, Debug)]
#[command(name = "booklane", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print structured JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a message about an item, starting the conversation if needed.
    Send {
        /// Sender as `id[:name]`.
        #[arg(long)]
        from: UserArg,
        /// Recipient as `id[:name]`.
        #[arg(long)]
        to: UserArg,
        /// Item as `id:title`.
        #[arg(long)]
        item: ItemArg,
        body: String,
    },
    /// List a user's conversations, most recent first.
    Inbox {
        #[arg(long)]
        user: UserArg,
    },
    /// Show a conversation and mark it read.
    Thread {
        #[arg(long)]
        user: UserArg,
        id: ConversationId,
    },
    /// Print a WhatsApp link that continues the conversation.
    Handoff {
        #[arg(long)]
        user: UserArg,
        id: ConversationId,
        /// Counterpart's phone number; remembered for next time.
        #[arg(long)]
        handle: Option<String>,
    },
    /// Record a notification for a user.
    Notify {
        #[arg(long)]
        user: UserArg,
        #[arg(long, default_value = "system")]
        kind: NotificationKind,
        /// Destination opened when the notification is activated.
        #[arg(long)]
        link: Option<String>,
        message: String,
    },
    /// List a user's notifications.
    Notifications {
        #[arg(long)]
        user: UserArg,
        /// all, unread, or a kind (message, transaction, new-listing, review, system).
        #[arg(long, default_value = "all")]
        filter: NotificationFilter,
        /// Open the dropdown: newest entries only, marking them seen.
        #[arg(long)]
        open: bool,
    },
    /// Mark a notification read, or all of them.
    Read {
        #[arg(long)]
        user: UserArg,
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<NotificationId>,
        #[arg(long)]
        all: bool,
    },
    /// Run the live surfaces against simulated events.
    Demo {
        #[arg(long)]
        user: UserArg,
        /// How long to run.
        #[arg(long, default_value_t = 60)]
        seconds: u64,
        /// Override the simulator period.
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => booklane_config::load_and_validate_path(path),
        None => booklane_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            booklane_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.app.log_level);

    let out = Output::new(cli.json, cli.plain);
    if let Err(e) = run(cli.command, config, &out).await {
        out.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(
    command: Commands,
    config: booklane_config::BooklaneConfig,
    out: &Output,
) -> Result<(), BooklaneError> {
    let engine = Engine::open(config)?;
    match command {
        Commands::Send {
            from,
            to,
            item,
            body,
        } => chat::run_send(&engine, out, &from, &to, &item, &body),
        Commands::Inbox { user } => chat::run_inbox(&engine, out, &user.0.id),
        Commands::Thread { user, id } => chat::run_thread(&engine, out, &user.0.id, &id),
        Commands::Handoff { user, id, handle } => {
            chat::run_handoff(&engine, out, &user.0.id, &id, handle.as_deref())
        }
        Commands::Notify {
            user,
            kind,
            link,
            message,
        } => alerts::run_notify(&engine, out, &user.0.id, kind, &message, link.as_deref()),
        Commands::Notifications { user, filter, open } => {
            alerts::run_list(&engine, out, &user.0.id, &filter, open)
        }
        Commands::Read { user, id, all } => {
            alerts::run_read(&engine, out, &user.0.id, id.as_ref(), all)
        }
        Commands::Demo {
            user,
            seconds,
            interval,
        } => demo::run_demo(&engine, out, user.0, seconds, interval).await,
    }
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("booklane={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn read_needs_id_or_all() {
        assert!(Cli::try_parse_from(["booklane", "read", "--user", "alice"]).is_err());
        assert!(Cli::try_parse_from(["booklane", "read", "--user", "alice", "--all"]).is_ok());
        assert!(
            Cli::try_parse_from(["booklane", "read", "--user", "alice", "n1", "--all"]).is_err()
        );
    }

    #[test]
    fn filter_and_kind_parse() {
        let cli = Cli::try_parse_from([
            "booklane",
            "notifications",
            "--user",
            "alice",
            "--filter",
            "new-listing",
        ])
        .unwrap();
        match cli.command {
            Commands::Notifications { filter, .. } => {
                assert_eq!(filter, NotificationFilter::Kind(NotificationKind::NewListing));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(
            Cli::try_parse_from(["booklane", "notify", "--user", "a", "--kind", "nope", "x"])
                .is_err()
        );
    }
}
