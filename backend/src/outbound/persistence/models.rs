//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations, plus the fallible
//! conversions back into domain entities.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::application::{Application, ApplicationId};
use crate::domain::job::{Job, JobId};
use crate::domain::user::{EmailAddress, Role, User, UserId, Username};
use crate::domain::PasswordDigest;

use super::schema::{applications, jobs, users};

/// A stored row failed validation on the way back into the domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {table} row {id}: {message}")]
pub(crate) struct RowConversionError {
    pub table: &'static str,
    pub id: i32,
    pub message: String,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let convert = |message: String| RowConversionError {
            table: "users",
            id: row.id,
            message,
        };
        Ok(Self {
            id: UserId(row.id),
            username: Username::new(&row.username).map_err(|e| convert(e.to_string()))?,
            email: EmailAddress::new(&row.email).map_err(|e| convert(e.to_string()))?,
            password_digest: PasswordDigest::from_phc_string(row.password_digest),
            role: row.role.parse::<Role>().map_err(|e| convert(e.to_string()))?,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_digest: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct JobRow {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    pub recruiter_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: JobId(row.id),
            title: row.title,
            company: row.company,
            description: row.description,
            location: row.location,
            salary: row.salary,
            recruiter_id: UserId(row.recruiter_id),
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating new job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub salary: Option<&'a str>,
    pub recruiter_id: i32,
}

/// Row struct for reading from the applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ApplicationRow {
    pub id: i32,
    pub candidate_id: i32,
    pub job_id: i32,
    pub name: String,
    pub email: String,
    pub cover_letter: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = RowConversionError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(&row.email).map_err(|e| RowConversionError {
            table: "applications",
            id: row.id,
            message: e.to_string(),
        })?;
        Ok(Self {
            id: ApplicationId(row.id),
            candidate_id: UserId(row.candidate_id),
            job_id: JobId(row.job_id),
            name: row.name,
            email,
            cover_letter: row.cover_letter,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for creating new application records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub(crate) struct NewApplicationRow<'a> {
    pub candidate_id: i32,
    pub job_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub cover_letter: Option<&'a str>,
}
