//! Registration, login, and logout handlers.
//!
//! ```text
//! GET  /            -> redirect to /login
//! GET  /register    -> register view
//! POST /register    username=..&email=..&password=..&role=recruiter
//! GET  /login       -> login view
//! POST /login       email=..&password=..
//! GET  /logout      -> clear session
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{ErrorCode, LoginCredentials, Registration};

use super::flash::FlashMessage;
use super::outcome::{landing_path, notice_redirect, see_other, PageView};
use super::session::SessionContext;
use super::state::HttpState;
use super::ApiResult;

/// Registration form body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Absent or empty means the default candidate role.
    pub role: Option<String>,
}

/// Login form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Entry point: everything starts at the login view.
#[get("/")]
pub async fn home() -> HttpResponse {
    see_other("/login")
}

/// Render the registration view.
#[get("/register")]
pub async fn register_page(session: SessionContext) -> ApiResult<HttpResponse> {
    let notices = session.take_notices()?;
    Ok(HttpResponse::Ok().json(PageView {
        page: "register",
        notices,
    }))
}

/// Create a user from the registration form.
///
/// Stateless with respect to the auth gate: the new user is not logged in
/// and is redirected to the login view on success.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let role = form.role.as_deref().filter(|value| !value.is_empty());
    let registration =
        match Registration::try_from_parts(&form.username, &form.email, &form.password, role) {
            Ok(registration) => registration,
            Err(error) => {
                debug!(%error, "registration form rejected");
                return notice_redirect(
                    &session,
                    FlashMessage::error(error.to_string()),
                    "/register",
                );
            }
        };

    match state.accounts.register(&registration).await {
        Ok(_) => notice_redirect(
            &session,
            FlashMessage::success("Registration successful! Please login."),
            "/login",
        ),
        Err(error) if error.code() == ErrorCode::Conflict => {
            notice_redirect(&session, FlashMessage::error(error.message()), "/register")
        }
        Err(error) => Err(error),
    }
}

/// Render the login view.
#[get("/login")]
pub async fn login_page(session: SessionContext) -> ApiResult<HttpResponse> {
    let notices = session.take_notices()?;
    Ok(HttpResponse::Ok().json(PageView {
        page: "login",
        notices,
    }))
}

/// Authenticate and establish the session.
///
/// Malformed credentials take the same failure path as a mismatch so the
/// outcome never discloses which part was wrong.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let invalid = || FlashMessage::error("Invalid email or password!");
    let credentials = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(error) => {
            debug!(%error, "login form rejected");
            return notice_redirect(&session, invalid(), "/login");
        }
    };

    match state.accounts.login(&credentials).await {
        Ok(user) => {
            session.persist_identity(&user)?;
            session.push_notice(FlashMessage::success(format!(
                "Welcome, {}!",
                user.username
            )))?;
            Ok(see_other(landing_path(user.role)))
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            notice_redirect(&session, invalid(), "/login")
        }
        Err(error) => Err(error),
    }
}

/// Clear the session unconditionally and return to the login view.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    notice_redirect(
        &session,
        FlashMessage::success("Logged out successfully!"),
        "/login",
    )
}
