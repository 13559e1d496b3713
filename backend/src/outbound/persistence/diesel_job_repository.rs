//! Diesel-backed `JobRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::job::{Job, JobId, NewJob};
use crate::domain::ports::{JobRepository, RepositoryError};
use crate::domain::user::UserId;

use super::diesel_helpers::run_blocking;
use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JobRow, NewJobRow};
use super::pool::{checkout, DbPool};
use super::schema::jobs;

/// Job persistence over the shared SQLite pool.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn create(&self, job: NewJob) -> Result<Job, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let row: JobRow = diesel::insert_into(jobs::table)
                .values(NewJobRow {
                    title: &job.title,
                    company: &job.company,
                    description: &job.description,
                    location: &job.location,
                    salary: job.salary.as_deref(),
                    recruiter_id: job.recruiter_id.0,
                })
                .returning(JobRow::as_returning())
                .get_result(&mut conn)
                .map_err(map_diesel_error)?;
            Ok(row.into())
        })
        .await
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let row = jobs::table
                .find(id.0)
                .select(JobRow::as_select())
                .first(&mut conn)
                .optional()
                .map_err(map_diesel_error)?;
            Ok(row.map(JobRow::into))
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<Job>, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let rows = jobs::table
                .order((jobs::created_at.desc(), jobs::id.desc()))
                .select(JobRow::as_select())
                .load(&mut conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(JobRow::into).collect())
        })
        .await
    }

    async fn list_by_recruiter(&self, recruiter: UserId) -> Result<Vec<Job>, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let rows = jobs::table
                .filter(jobs::recruiter_id.eq(recruiter.0))
                .order((jobs::created_at.desc(), jobs::id.desc()))
                .select(JobRow::as_select())
                .load(&mut conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(JobRow::into).collect())
        })
        .await
    }
}
