// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations for the SQLite store.
//!
//! SQL files under `migrations/` are compiled in with `embed_migrations!`
//! and applied every time a store is opened.

use booklane_core::BooklaneError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply all pending migrations. Refinery records progress in
/// `refinery_schema_history`, so reopening an existing file is a no-op.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), BooklaneError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(BooklaneError::storage)?;
    for migration in report.applied_migrations() {
        tracing::debug!(
            version = migration.version(),
            name = migration.name(),
            "migration applied"
        );
    }
    Ok(())
}
