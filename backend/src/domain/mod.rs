//! Domain primitives, workflow services, and ports.
//!
//! Purpose: define the strongly typed entities of the job portal (users,
//! jobs, applications), the validation applied at the domain boundary, and
//! the repository ports the persistence adapters implement. Everything here
//! is transport agnostic; the inbound HTTP layer maps errors and outcomes
//! to responses.

pub mod account_service;
pub mod application;
pub mod auth;
pub mod error;
pub mod job;
pub mod job_board_service;
pub mod password;
pub mod ports;
pub mod user;

pub use self::account_service::AccountService;
pub use self::application::{Application, ApplicationId, ApplicationValidationError, NewApplication};
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::job::{Job, JobId, JobValidationError, NewJob};
pub use self::job_board_service::JobBoardService;
pub use self::password::{PasswordDigest, PasswordHashError};
pub use self::user::{EmailAddress, NewUser, Role, User, UserId, UserValidationError, Username};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
