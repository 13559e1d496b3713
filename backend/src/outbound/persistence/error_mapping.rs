//! Shared mapping from Diesel and pool failures to repository errors.

use tracing::debug;

use crate::domain::ports::{DuplicateField, RepositoryError};

use super::models::RowConversionError;
use super::pool::PoolError;

/// Map pool failures to a repository connection error.
pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RepositoryError::connection(message)
}

/// Map common Diesel error variants into repository errors.
///
/// Unique-constraint violations inspect the SQLite message
/// (`UNIQUE constraint failed: users.email`) to name the violated field.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(%other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            duplicate_field(info.message()).map_or_else(
                || RepositoryError::query("unique constraint violated"),
                RepositoryError::duplicate,
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection closed")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        _ => RepositoryError::query("database error"),
    }
}

/// Surface a corrupt stored row as a query error.
pub(super) fn map_row_error(error: RowConversionError) -> RepositoryError {
    RepositoryError::query(error.to_string())
}

fn duplicate_field(message: &str) -> Option<DuplicateField> {
    if message.contains("users.email") {
        Some(DuplicateField::Email)
    } else if message.contains("users.username") {
        Some(DuplicateField::Username)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    //! Mapping coverage for the error translation helpers.
    use super::*;

    #[test]
    fn unique_violation_names_the_field() {
        assert_eq!(
            duplicate_field("UNIQUE constraint failed: users.email"),
            Some(DuplicateField::Email)
        );
        assert_eq!(
            duplicate_field("UNIQUE constraint failed: users.username"),
            Some(DuplicateField::Username)
        );
        assert_eq!(duplicate_field("UNIQUE constraint failed: other.col"), None);
    }

    #[test]
    fn pool_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, RepositoryError::connection("timed out"));
    }
}
