//! Job posting model.
//!
//! A job is owned by exactly one recruiter; the owner is fixed at creation
//! and no edit or delete operation exists.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Stable numeric job identifier (database row id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Published job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub recruiter_id: UserId,
    pub created_at: NaiveDateTime,
}

/// Validation errors raised while assembling a job posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobValidationError {
    EmptyTitle,
    EmptyCompany,
    EmptyDescription,
    EmptyLocation,
}

impl fmt::Display for JobValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self {
            Self::EmptyTitle => "title",
            Self::EmptyCompany => "company",
            Self::EmptyDescription => "description",
            Self::EmptyLocation => "location",
        };
        write!(f, "{field} must not be empty")
    }
}

impl std::error::Error for JobValidationError {}

/// Input record for posting a job.
///
/// An empty salary field is stored as absent rather than as an empty
/// string.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub recruiter_id: UserId,
}

impl NewJob {
    /// Validate and assemble a job posting owned by `recruiter_id`.
    pub fn try_from_parts(
        title: &str,
        company: &str,
        location: &str,
        salary: Option<&str>,
        description: &str,
        recruiter_id: UserId,
    ) -> Result<Self, JobValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(JobValidationError::EmptyTitle);
        }
        let company = company.trim();
        if company.is_empty() {
            return Err(JobValidationError::EmptyCompany);
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(JobValidationError::EmptyLocation);
        }
        if description.trim().is_empty() {
            return Err(JobValidationError::EmptyDescription);
        }
        let salary = salary
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            title: title.to_owned(),
            company: company.to_owned(),
            description: description.to_owned(),
            location: location.to_owned(),
            salary,
            recruiter_id,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for job input validation.
    use rstest::rstest;

    use super::*;

    fn build(
        title: &str,
        company: &str,
        location: &str,
        salary: Option<&str>,
        description: &str,
    ) -> Result<NewJob, JobValidationError> {
        NewJob::try_from_parts(title, company, location, salary, description, UserId(1))
    }

    #[rstest]
    #[case("", "Acme", "Remote", "desc", JobValidationError::EmptyTitle)]
    #[case("Engineer", " ", "Remote", "desc", JobValidationError::EmptyCompany)]
    #[case("Engineer", "Acme", "", "desc", JobValidationError::EmptyLocation)]
    #[case("Engineer", "Acme", "Remote", "  ", JobValidationError::EmptyDescription)]
    fn blank_required_fields_are_rejected(
        #[case] title: &str,
        #[case] company: &str,
        #[case] location: &str,
        #[case] description: &str,
        #[case] expected: JobValidationError,
    ) {
        let err = build(title, company, location, None, description).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("  "), None)]
    #[case(Some("100k"), Some("100k"))]
    fn blank_salary_is_stored_as_absent(
        #[case] salary: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let job = build("Engineer", "Acme", "Remote", salary, "Build things")
            .expect("valid job posting");
        assert_eq!(job.salary.as_deref(), expected);
    }
}
