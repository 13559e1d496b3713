//! Persistence adapters backed by Diesel over SQLite.

mod diesel_application_repository;
mod diesel_helpers;
mod diesel_job_repository;
mod diesel_user_repository;
mod error_mapping;
pub mod migrations;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{apply_pending, MigrationError};
pub use pool::{build_pool, DbPool, PoolError};
