//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the relational store). Each trait exposes strongly typed errors so
//! adapters map their failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error;

use super::application::{Application, NewApplication};
use super::job::{Job, JobId, NewJob};
use super::user::{EmailAddress, NewUser, User, UserId};

/// Column whose uniqueness constraint was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Username,
    Email,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username => write!(f, "username"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Failures surfaced by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("repository connection error: {message}")]
    Connection { message: String },

    /// A query failed for reasons other than a uniqueness conflict.
    #[error("repository query error: {message}")]
    Query { message: String },

    /// A write would violate a uniqueness invariant.
    #[error("duplicate {field}")]
    DuplicateKey { field: DuplicateField },
}

impl RepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-key error for the given field.
    pub fn duplicate(field: DuplicateField) -> Self {
        Self::DuplicateKey { field }
    }
}

impl From<RepositoryError> for super::Error {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => Self::service_unavailable(message),
            RepositoryError::Query { message } => Self::internal(message),
            RepositoryError::DuplicateKey { field } => match field {
                DuplicateField::Email => Self::conflict("Email already registered!"),
                DuplicateField::Username => Self::conflict("Username already taken!"),
            },
        }
    }
}

/// Storage port for user identities.
///
/// `create` must enforce the global uniqueness of username and email at
/// write time, surfacing [`RepositoryError::DuplicateKey`] on conflict.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored row.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Fetch a user by id, `None` when absent.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by email, `None` when absent.
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<User>, RepositoryError>;
}

/// Storage port for job postings.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a new job and return the stored row.
    async fn create(&self, job: NewJob) -> Result<Job, RepositoryError>;

    /// Fetch a job by id, `None` when absent.
    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// All jobs, newest first.
    async fn list_all(&self) -> Result<Vec<Job>, RepositoryError>;

    /// Jobs owned by the given recruiter, newest first.
    async fn list_by_recruiter(&self, recruiter: UserId) -> Result<Vec<Job>, RepositoryError>;
}

/// Storage port for submitted applications.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application and return the stored row.
    async fn create(&self, application: NewApplication) -> Result<Application, RepositoryError>;

    /// Applications submitted against the given job, oldest first.
    async fn list_for_job(&self, job: JobId) -> Result<Vec<Application>, RepositoryError>;

    /// Applications submitted by the given candidate, oldest first.
    async fn list_for_candidate(
        &self,
        candidate: UserId,
    ) -> Result<Vec<Application>, RepositoryError>;
}
