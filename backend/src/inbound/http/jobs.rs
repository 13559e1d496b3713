//! Dashboard, job-posting, application, and applicant-review handlers.
//!
//! Every operation here sits behind the role gate: candidates browse and
//! apply, recruiters post and review. Gate failures recover into the
//! "Access denied!" redirect; a missing job on a path parameter surfaces
//! as a plain 404.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Application, ErrorCode, Job, JobId, NewApplication, NewJob, Role,
};

use super::flash::FlashMessage;
use super::outcome::{access_denied, notice_redirect, PageView};
use super::session::SessionContext;
use super::state::HttpState;
use super::ApiResult;

/// Job-posting form body for `POST /post-job`.
#[derive(Debug, Deserialize)]
pub struct PostJobForm {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Absent or empty means no salary is advertised.
    pub salary: Option<String>,
    pub description: String,
}

/// Application form body for `POST /apply-job/{job_id}`.
#[derive(Debug, Deserialize)]
pub struct ApplyForm {
    pub name: String,
    pub email: String,
    pub cover_letter: Option<String>,
}

/// Candidate dashboard payload: every open job plus the candidate's own
/// submissions.
#[derive(Debug, Serialize)]
pub struct CandidateDashboardView {
    pub notices: Vec<FlashMessage>,
    pub jobs: Vec<Job>,
    pub my_applications: Vec<Application>,
}

/// Recruiter dashboard payload: jobs the recruiter owns.
#[derive(Debug, Serialize)]
pub struct RecruiterDashboardView {
    pub notices: Vec<FlashMessage>,
    pub jobs: Vec<Job>,
}

/// Apply-view payload: the job the candidate is applying to.
#[derive(Debug, Serialize)]
pub struct ApplyView {
    pub notices: Vec<FlashMessage>,
    pub job: Job,
}

/// Applicant-review payload: the job and every submission against it.
#[derive(Debug, Serialize)]
pub struct ApplicantsView {
    pub notices: Vec<FlashMessage>,
    pub job: Job,
    pub applications: Vec<Application>,
}

/// All jobs, for an authenticated candidate.
#[get("/candidate-dashboard")]
pub async fn candidate_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Ok(identity) = session.require_role(Role::Candidate) else {
        return access_denied(&session);
    };
    let jobs = state.job_board.list_all_jobs().await?;
    let my_applications = state
        .job_board
        .applications_for_candidate(identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(CandidateDashboardView {
        notices: session.take_notices()?,
        jobs,
        my_applications,
    }))
}

/// Own jobs, for an authenticated recruiter.
#[get("/recruiter-dashboard")]
pub async fn recruiter_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Ok(identity) = session.require_role(Role::Recruiter) else {
        return access_denied(&session);
    };
    let jobs = state.job_board.jobs_for_recruiter(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(RecruiterDashboardView {
        notices: session.take_notices()?,
        jobs,
    }))
}

/// Render the job-posting view.
#[get("/post-job")]
pub async fn post_job_page(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.require_role(Role::Recruiter).is_err() {
        return access_denied(&session);
    }
    Ok(HttpResponse::Ok().json(PageView {
        page: "post-job",
        notices: session.take_notices()?,
    }))
}

/// Create a job owned by the current recruiter.
#[post("/post-job")]
pub async fn post_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PostJobForm>,
) -> ApiResult<HttpResponse> {
    let Ok(identity) = session.require_role(Role::Recruiter) else {
        return access_denied(&session);
    };
    let form = form.into_inner();
    let job = match NewJob::try_from_parts(
        &form.title,
        &form.company,
        &form.location,
        form.salary.as_deref(),
        &form.description,
        identity.user_id,
    ) {
        Ok(job) => job,
        Err(error) => {
            debug!(%error, "job posting form rejected");
            return notice_redirect(&session, FlashMessage::error(error.to_string()), "/post-job");
        }
    };
    state.job_board.post_job(job).await?;
    notice_redirect(
        &session,
        FlashMessage::success("Job posted successfully!"),
        "/recruiter-dashboard",
    )
}

/// Render the application view for one job; 404 when the job is missing.
#[get("/apply-job/{job_id}")]
pub async fn apply_job_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    if session.require_role(Role::Candidate).is_err() {
        return access_denied(&session);
    }
    let job = state.job_board.job(JobId(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(ApplyView {
        notices: session.take_notices()?,
        job,
    }))
}

/// Submit an application against one job; 404 when the job is missing.
///
/// Re-application is permitted: each submission creates a distinct row.
#[post("/apply-job/{job_id}")]
pub async fn apply_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<ApplyForm>,
) -> ApiResult<HttpResponse> {
    let Ok(identity) = session.require_role(Role::Candidate) else {
        return access_denied(&session);
    };
    let job_id = JobId(path.into_inner());
    let form = form.into_inner();
    let application = match NewApplication::try_from_parts(
        identity.user_id,
        job_id,
        &form.name,
        &form.email,
        form.cover_letter.as_deref(),
    ) {
        Ok(application) => application,
        Err(error) => {
            debug!(%error, "application form rejected");
            return notice_redirect(
                &session,
                FlashMessage::error(error.to_string()),
                &format!("/apply-job/{job_id}"),
            );
        }
    };
    let (job, _) = state.job_board.apply(application).await?;
    notice_redirect(
        &session,
        FlashMessage::success(format!("You have applied for {}!", job.title)),
        "/candidate-dashboard",
    )
}

/// Review applications for an owned job; 404 when the job is missing.
///
/// A recruiter reviewing somebody else's job is turned back to their own
/// dashboard with a notice, applicants or not.
#[get("/view-applicants/{job_id}")]
pub async fn view_applicants(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let Ok(identity) = session.require_role(Role::Recruiter) else {
        return access_denied(&session);
    };
    let job_id = JobId(path.into_inner());
    match state.job_board.applicants(identity.user_id, job_id).await {
        Ok((job, applications)) => Ok(HttpResponse::Ok().json(ApplicantsView {
            notices: session.take_notices()?,
            job,
            applications,
        })),
        Err(error) if error.code() == ErrorCode::Forbidden => notice_redirect(
            &session,
            FlashMessage::error(error.message()),
            "/recruiter-dashboard",
        ),
        Err(error) => Err(error),
    }
}
