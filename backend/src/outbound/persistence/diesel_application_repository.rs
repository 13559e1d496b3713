//! Diesel-backed `ApplicationRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::application::{Application, NewApplication};
use crate::domain::job::JobId;
use crate::domain::ports::{ApplicationRepository, RepositoryError};
use crate::domain::user::UserId;

use super::diesel_helpers::run_blocking;
use super::error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{ApplicationRow, NewApplicationRow};
use super::pool::{checkout, DbPool};
use super::schema::applications;

/// Application persistence over the shared SQLite pool.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn collect_rows(rows: Vec<ApplicationRow>) -> Result<Vec<Application>, RepositoryError> {
    rows.into_iter()
        .map(|row| row.try_into().map_err(map_row_error))
        .collect()
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn create(&self, application: NewApplication) -> Result<Application, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let row: ApplicationRow = diesel::insert_into(applications::table)
                .values(NewApplicationRow {
                    candidate_id: application.candidate_id.0,
                    job_id: application.job_id.0,
                    name: &application.name,
                    email: application.email.as_str(),
                    cover_letter: application.cover_letter.as_deref(),
                })
                .returning(ApplicationRow::as_returning())
                .get_result(&mut conn)
                .map_err(map_diesel_error)?;
            row.try_into().map_err(map_row_error)
        })
        .await
    }

    async fn list_for_job(&self, job: JobId) -> Result<Vec<Application>, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let rows = applications::table
                .filter(applications::job_id.eq(job.0))
                .order(applications::id.asc())
                .select(ApplicationRow::as_select())
                .load(&mut conn)
                .map_err(map_diesel_error)?;
            collect_rows(rows)
        })
        .await
    }

    async fn list_for_candidate(
        &self,
        candidate: UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let rows = applications::table
                .filter(applications::candidate_id.eq(candidate.0))
                .order(applications::id.asc())
                .select(ApplicationRow::as_select())
                .load(&mut conn)
                .map_err(map_diesel_error)?;
            collect_rows(rows)
        })
        .await
    }
}
