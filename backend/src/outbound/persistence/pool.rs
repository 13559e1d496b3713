//! Connection pool for Diesel SQLite connections.
//!
//! Wraps `diesel::r2d2` to provide a pooled connection source for the
//! persistence adapters. Every connection enables foreign-key enforcement
//! and a busy timeout before it is handed out, since SQLite serialises
//! writers and concurrent handlers would otherwise surface `SQLITE_BUSY`.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;

/// Shared connection pool handed to repositories.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out of [`DbPool`].
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build a pool for the given database URL (a SQLite file path or
/// `:memory:`).
pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
        .map_err(|error| PoolError::build(error.to_string()))
}

/// Check a connection out of the pool.
pub fn checkout(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().map_err(|error| PoolError::checkout(error.to_string()))
}
