//! Job and application workflows over the repository ports.
//!
//! Role membership is checked at the HTTP boundary; this service enforces
//! the one invariant that needs data: a recruiter may only review
//! applicants for jobs they own.

use std::sync::Arc;

use tracing::info;

use super::application::{Application, NewApplication};
use super::job::{Job, JobId, NewJob};
use super::ports::{ApplicationRepository, JobRepository};
use super::user::UserId;
use super::Error;

/// Job board workflows: browsing, posting, applying, and applicant review.
#[derive(Clone)]
pub struct JobBoardService {
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl JobBoardService {
    /// Create the service over job and application repositories.
    pub fn new(jobs: Arc<dyn JobRepository>, applications: Arc<dyn ApplicationRepository>) -> Self {
        Self { jobs, applications }
    }

    /// All jobs, newest first (candidate dashboard).
    pub async fn list_all_jobs(&self) -> Result<Vec<Job>, Error> {
        Ok(self.jobs.list_all().await?)
    }

    /// Jobs owned by the given recruiter, newest first.
    pub async fn jobs_for_recruiter(&self, recruiter: UserId) -> Result<Vec<Job>, Error> {
        Ok(self.jobs.list_by_recruiter(recruiter).await?)
    }

    /// Applications the given candidate has submitted, oldest first.
    pub async fn applications_for_candidate(
        &self,
        candidate: UserId,
    ) -> Result<Vec<Application>, Error> {
        Ok(self.applications.list_for_candidate(candidate).await?)
    }

    /// Fetch a job by id, failing with `NotFound` when absent.
    pub async fn job(&self, id: JobId) -> Result<Job, Error> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("job not found"))
    }

    /// Publish a new job posting.
    pub async fn post_job(&self, job: NewJob) -> Result<Job, Error> {
        let job = self.jobs.create(job).await?;
        info!(job_id = %job.id, recruiter_id = %job.recruiter_id, "job posted");
        Ok(job)
    }

    /// Submit an application against an existing job.
    ///
    /// Returns the job together with the stored application so callers can
    /// reference the posting (its title) in the outcome. Re-application by
    /// the same candidate is permitted and creates a distinct row.
    pub async fn apply(&self, application: NewApplication) -> Result<(Job, Application), Error> {
        let job = self.job(application.job_id).await?;
        let application = self.applications.create(application).await?;
        info!(
            application_id = %application.id,
            job_id = %job.id,
            candidate_id = %application.candidate_id,
            "application submitted"
        );
        Ok((job, application))
    }

    /// Fetch a job and its applications for the owning recruiter.
    ///
    /// Fails with `NotFound` when the job is absent and `Forbidden` when
    /// `recruiter` does not own it, regardless of whether applicants exist.
    pub async fn applicants(
        &self,
        recruiter: UserId,
        job_id: JobId,
    ) -> Result<(Job, Vec<Application>), Error> {
        let job = self.job(job_id).await?;
        if job.recruiter_id != recruiter {
            return Err(Error::forbidden(
                "You can only view applicants for your jobs.",
            ));
        }
        let applications = self.applications.list_for_job(job_id).await?;
        Ok((job, applications))
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour over stub repositories.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::application::ApplicationId;
    use crate::domain::ports::RepositoryError;
    use crate::domain::user::EmailAddress;
    use crate::domain::ErrorCode;

    #[derive(Default)]
    struct StubJobRepository {
        rows: Mutex<Vec<Job>>,
    }

    #[async_trait]
    impl JobRepository for StubJobRepository {
        async fn create(&self, job: NewJob) -> Result<Job, RepositoryError> {
            let mut rows = self.rows.lock().expect("rows lock");
            let id = i32::try_from(rows.len()).expect("stub row count fits i32") + 1;
            let stored = Job {
                id: JobId(id),
                title: job.title,
                company: job.company,
                description: job.description,
                location: job.location,
                salary: job.salary,
                recruiter_id: job.recruiter_id,
                created_at: NaiveDateTime::default(),
            };
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
            let rows = self.rows.lock().expect("rows lock");
            Ok(rows.iter().find(|row| row.id == id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Job>, RepositoryError> {
            let rows = self.rows.lock().expect("rows lock");
            let mut jobs = rows.clone();
            jobs.reverse();
            Ok(jobs)
        }

        async fn list_by_recruiter(&self, recruiter: UserId) -> Result<Vec<Job>, RepositoryError> {
            let rows = self.rows.lock().expect("rows lock");
            let mut jobs: Vec<Job> = rows
                .iter()
                .filter(|row| row.recruiter_id == recruiter)
                .cloned()
                .collect();
            jobs.reverse();
            Ok(jobs)
        }
    }

    #[derive(Default)]
    struct StubApplicationRepository {
        rows: Mutex<Vec<Application>>,
    }

    #[async_trait]
    impl ApplicationRepository for StubApplicationRepository {
        async fn create(
            &self,
            application: NewApplication,
        ) -> Result<Application, RepositoryError> {
            let mut rows = self.rows.lock().expect("rows lock");
            let id = i32::try_from(rows.len()).expect("stub row count fits i32") + 1;
            let stored = Application {
                id: ApplicationId(id),
                candidate_id: application.candidate_id,
                job_id: application.job_id,
                name: application.name,
                email: application.email,
                cover_letter: application.cover_letter,
                created_at: NaiveDateTime::default(),
            };
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn list_for_job(&self, job: JobId) -> Result<Vec<Application>, RepositoryError> {
            let rows = self.rows.lock().expect("rows lock");
            Ok(rows.iter().filter(|row| row.job_id == job).cloned().collect())
        }

        async fn list_for_candidate(
            &self,
            candidate: UserId,
        ) -> Result<Vec<Application>, RepositoryError> {
            let rows = self.rows.lock().expect("rows lock");
            Ok(rows
                .iter()
                .filter(|row| row.candidate_id == candidate)
                .cloned()
                .collect())
        }
    }

    fn service() -> JobBoardService {
        JobBoardService::new(
            Arc::new(StubJobRepository::default()),
            Arc::new(StubApplicationRepository::default()),
        )
    }

    fn new_job(recruiter: UserId) -> NewJob {
        NewJob::try_from_parts("Engineer", "Acme", "Remote", None, "Build things", recruiter)
            .expect("valid job")
    }

    fn new_application(candidate: UserId, job: JobId) -> NewApplication {
        NewApplication::try_from_parts(candidate, job, "C1", "c1@x.com", None)
            .expect("valid application")
    }

    #[tokio::test]
    async fn apply_against_missing_job_is_not_found() {
        let err = service()
            .apply(new_application(UserId(1), JobId(99)))
            .await
            .expect_err("missing job must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn reapplying_creates_a_second_distinct_row() {
        let service = service();
        let job = service.post_job(new_job(UserId(1))).await.expect("posted");

        let (_, first) = service
            .apply(new_application(UserId(2), job.id))
            .await
            .expect("first application succeeds");
        let (_, second) = service
            .apply(new_application(UserId(2), job.id))
            .await
            .expect("second application succeeds");

        assert_ne!(first.id, second.id);
        let (_, applications) = service
            .applicants(UserId(1), job.id)
            .await
            .expect("owner reviews applicants");
        assert_eq!(applications.len(), 2);
    }

    #[tokio::test]
    async fn applicants_for_foreign_job_is_forbidden() {
        let service = service();
        let job = service.post_job(new_job(UserId(1))).await.expect("posted");

        let err = service
            .applicants(UserId(2), job.id)
            .await
            .expect_err("non-owner must be denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "You can only view applicants for your jobs.");
    }

    #[tokio::test]
    async fn applicants_email_matches_submission() {
        let service = service();
        let job = service.post_job(new_job(UserId(1))).await.expect("posted");
        service
            .apply(new_application(UserId(2), job.id))
            .await
            .expect("application succeeds");

        let (stored_job, applications) = service
            .applicants(UserId(1), job.id)
            .await
            .expect("owner reviews applicants");
        assert_eq!(stored_job.title, "Engineer");
        assert_eq!(
            applications[0].email,
            EmailAddress::new("c1@x.com").expect("valid email")
        );
    }

    #[tokio::test]
    async fn recruiter_dashboard_lists_only_own_jobs() {
        let service = service();
        service.post_job(new_job(UserId(1))).await.expect("posted");
        service.post_job(new_job(UserId(2))).await.expect("posted");

        let own = service
            .jobs_for_recruiter(UserId(1))
            .await
            .expect("listing succeeds");
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].recruiter_id, UserId(1));

        let all = service.list_all_jobs().await.expect("listing succeeds");
        assert_eq!(all.len(), 2);
    }
}
