//! Shared application state handed to HTTP handlers.

use crate::domain::{AccountService, JobBoardService};

/// Services injected into every handler via `web::Data`.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub job_board: JobBoardService,
}

impl HttpState {
    /// Bundle the workflow services for handler injection.
    pub fn new(accounts: AccountService, job_board: JobBoardService) -> Self {
        Self {
            accounts,
            job_board,
        }
    }
}
