//! Registration and login over the user repository port.

use std::sync::Arc;

use tracing::{debug, info};

use super::auth::{LoginCredentials, Registration};
use super::password::PasswordDigest;
use super::ports::UserRepository;
use super::user::{NewUser, User};
use super::Error;

/// Account workflows: registration and credential verification.
///
/// Login failures are indistinguishable between an unregistered email and
/// a wrong password. When the lookup misses, verification still runs
/// against a fallback digest so both paths perform the same work.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    fallback_digest: PasswordDigest,
}

impl AccountService {
    /// Create the service over a user repository.
    ///
    /// # Errors
    /// Fails when the fallback digest cannot be computed, which indicates a
    /// broken hashing backend and makes login unserviceable.
    pub fn new(users: Arc<dyn UserRepository>) -> Result<Self, Error> {
        let fallback_digest = PasswordDigest::fallback()
            .map_err(|error| Error::internal(format!("hashing backend unavailable: {error}")))?;
        Ok(Self {
            users,
            fallback_digest,
        })
    }

    /// Register a new user.
    ///
    /// The uniqueness of username and email is enforced by the store; a
    /// conflicting insert surfaces as [`crate::domain::ErrorCode::Conflict`]
    /// and creates no row. The new user is not logged in.
    pub async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_digest = PasswordDigest::hash(registration.password())
            .map_err(|error| Error::internal(format!("failed to hash password: {error}")))?;
        let user = self
            .users
            .create(NewUser {
                username: registration.username().clone(),
                email: registration.email().clone(),
                password_digest,
                role: registration.role(),
            })
            .await?;
        info!(user_id = %user.id, role = %user.role, "registered new user");
        Ok(user)
    }

    /// Verify credentials and return the authenticated user.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self.users.find_by_email(credentials.email()).await?;
        let digest = user
            .as_ref()
            .map_or(&self.fallback_digest, |found| &found.password_digest);
        let verified = digest.verify(credentials.password());
        match user {
            Some(user) if verified => {
                info!(user_id = %user.id, role = %user.role, "login succeeded");
                Ok(user)
            }
            _ => {
                debug!("login failed");
                Err(Error::unauthorized("Invalid email or password!"))
            }
        }
    }
}
