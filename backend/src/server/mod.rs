//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};

use crate::domain::{AccountService, Error, JobBoardService};
use crate::inbound::http::auth::{home, login, login_page, logout, register, register_page};
use crate::inbound::http::jobs::{
    apply_job, apply_job_page, candidate_dashboard, post_job, post_job_page, recruiter_dashboard,
    view_applicants,
};
use crate::inbound::http::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselApplicationRepository, DieselJobRepository, DieselUserRepository,
};

/// Build the cookie session middleware.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Wire the workflow services over Diesel repositories.
///
/// # Errors
/// Fails when the account service cannot prime its hashing backend.
pub fn build_state(pool: &DbPool) -> Result<HttpState, Error> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let jobs = Arc::new(DieselJobRepository::new(pool.clone()));
    let applications = Arc::new(DieselApplicationRepository::new(pool.clone()));
    Ok(HttpState::new(
        AccountService::new(users)?,
        JobBoardService::new(jobs, applications),
    ))
}

/// Assemble the application with every route and the session middleware.
pub fn build_app(
    state: web::Data<HttpState>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(session)
        .service(home)
        .service(register_page)
        .service(register)
        .service(login_page)
        .service(login)
        .service(logout)
        .service(candidate_dashboard)
        .service(recruiter_dashboard)
        .service(post_job_page)
        .service(post_job)
        .service(apply_job_page)
        .service(apply_job)
        .service(view_applicants)
}
