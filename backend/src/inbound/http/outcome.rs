//! Redirect and view outcomes shared by the workflow handlers.
//!
//! Every workflow failure that the original role gate recovers from is
//! surfaced the same way: queue a notice, redirect. Helpers here keep the
//! handlers down to their workflow logic.

use actix_web::http::header;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::Role;

use super::flash::FlashMessage;
use super::session::SessionContext;

/// `303 See Other` redirect to the given location.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Queue a notice and redirect, the standard workflow-failure outcome.
pub fn notice_redirect(
    session: &SessionContext,
    notice: FlashMessage,
    location: &str,
) -> Result<HttpResponse, crate::domain::Error> {
    session.push_notice(notice)?;
    Ok(see_other(location))
}

/// The role-gate failure outcome: "Access denied!" and back to login.
pub fn access_denied(session: &SessionContext) -> Result<HttpResponse, crate::domain::Error> {
    notice_redirect(session, FlashMessage::error("Access denied!"), "/login")
}

/// Landing page for a freshly authenticated identity.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Recruiter => "/recruiter-dashboard",
        Role::Candidate => "/candidate-dashboard",
    }
}

/// Minimal envelope for form-entry views rendered by the external
/// presentation layer.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: &'static str,
    pub notices: Vec<FlashMessage>,
}
