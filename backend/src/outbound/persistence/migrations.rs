//! Embedded schema migrations.
//!
//! The schema is never dropped or recreated at start-up. Pending
//! migrations run only when the operator explicitly asks for them
//! (`APPLY_MIGRATIONS=1`); the default path leaves existing data alone.

use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use super::pool::{checkout, DbPool};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not obtain a connection to migrate over.
    #[error("migration connection error: {message}")]
    Connection { message: String },

    /// A migration failed to apply.
    #[error("migration failed: {message}")]
    Apply { message: String },
}

/// Apply all pending migrations over a checked-out connection.
///
/// Returns the number of migrations applied. Already-applied migrations
/// are skipped, so calling this against an up-to-date database is a no-op.
pub fn apply_pending(pool: &DbPool) -> Result<usize, MigrationError> {
    let mut conn = checkout(pool).map_err(|error| MigrationError::Connection {
        message: error.to_string(),
    })?;
    let applied = run_pending(&mut conn)?;
    if applied == 0 {
        info!("database schema is up to date");
    } else {
        info!(applied, "applied pending migrations");
    }
    Ok(applied)
}

fn run_pending(conn: &mut SqliteConnection) -> Result<usize, MigrationError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|versions| versions.len())
        .map_err(|error| MigrationError::Apply {
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    //! Migration idempotence over an in-memory database.
    use super::super::pool::build_pool;
    use super::*;

    #[test]
    fn applies_once_then_noops() {
        let pool = build_pool(":memory:", 1).expect("pool builds");
        let first = apply_pending(&pool).expect("first run succeeds");
        assert_eq!(first, 3);
        let second = apply_pending(&pool).expect("second run succeeds");
        assert_eq!(second, 0);
    }
}
