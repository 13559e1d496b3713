//! Job application model.
//!
//! An application records a candidate's submission against one job. There
//! is deliberately no uniqueness constraint on (candidate, job): applying
//! again creates a fresh row and recruiters see every submission.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::job::JobId;
use super::user::{EmailAddress, UserId, UserValidationError};

/// Stable numeric application identifier (database row id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i32);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: UserId,
    pub job_id: JobId,
    pub name: String,
    pub email: EmailAddress,
    pub cover_letter: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Validation errors raised while assembling an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationValidationError {
    EmptyName,
    InvalidEmail,
}

impl fmt::Display for ApplicationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for ApplicationValidationError {}

/// Input record for submitting an application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub candidate_id: UserId,
    pub job_id: JobId,
    pub name: String,
    pub email: EmailAddress,
    pub cover_letter: Option<String>,
}

impl NewApplication {
    /// Validate and assemble an application from form inputs.
    pub fn try_from_parts(
        candidate_id: UserId,
        job_id: JobId,
        name: &str,
        email: &str,
        cover_letter: Option<&str>,
    ) -> Result<Self, ApplicationValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationValidationError::EmptyName);
        }
        let email = EmailAddress::new(email).map_err(|error| match error {
            UserValidationError::EmptyEmail
            | UserValidationError::InvalidEmail
            | UserValidationError::EmailTooLong { .. } => ApplicationValidationError::InvalidEmail,
            other => {
                tracing::debug!(%other, "unexpected email validation failure");
                ApplicationValidationError::InvalidEmail
            }
        })?;
        let cover_letter = cover_letter
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            candidate_id,
            job_id,
            name: name.to_owned(),
            email,
            cover_letter,
        })
    }
}
