//! Helpers shared by the Diesel repository adapters.

use crate::domain::ports::RepositoryError;

/// Run a blocking Diesel closure off the async executor.
///
/// SQLite queries are synchronous; repositories push them onto the
/// blocking thread pool so handlers never stall the reactor.
pub(super) async fn run_blocking<T, F>(f: F) -> Result<T, RepositoryError>
where
    F: FnOnce() -> Result<T, RepositoryError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|error| RepositoryError::query(format!("blocking task failed: {error}")))?
}
