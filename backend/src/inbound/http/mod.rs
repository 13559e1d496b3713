//! HTTP inbound adapter exposing the job-portal surface.

pub mod auth;
pub mod error;
pub mod flash;
pub mod jobs;
pub mod outcome;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use state::HttpState;
