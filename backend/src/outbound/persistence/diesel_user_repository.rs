//! Diesel-backed `UserRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::user::{EmailAddress, NewUser, User, UserId};

use super::diesel_helpers::run_blocking;
use super::error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{checkout, DbPool};
use super::schema::users;

/// User persistence over the shared SQLite pool.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let row: UserRow = diesel::insert_into(users::table)
                .values(NewUserRow {
                    username: user.username.as_str(),
                    email: user.email.as_str(),
                    password_digest: user.password_digest.as_str(),
                    role: user.role.as_str(),
                })
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .map_err(map_diesel_error)?;
            row.try_into().map_err(map_row_error)
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let row = users::table
                .find(id.0)
                .select(UserRow::as_select())
                .first(&mut conn)
                .optional()
                .map_err(map_diesel_error)?;
            row.map(|found: UserRow| found.try_into().map_err(map_row_error))
                .transpose()
        })
        .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, RepositoryError> {
        let pool = self.pool.clone();
        let email = email.as_str().to_owned();
        run_blocking(move || {
            let mut conn = checkout(&pool).map_err(map_pool_error)?;
            let row = users::table
                .filter(users::email.eq(&email))
                .select(UserRow::as_select())
                .first(&mut conn)
                .optional()
                .map_err(map_diesel_error)?;
            row.map(|found: UserRow| found.try_into().map_err(map_row_error))
                .transpose()
        })
        .await
    }
}
