use std::future::Future;

use super::domain::{ApplicationId, ApplicationRecord};

/// Upstream supplier of application records, so the service can be exercised without a network.
pub trait ApplicationSource: Send + Sync {
    fn fetch(
        &self,
        id: &ApplicationId,
    ) -> impl Future<Output = Result<ApplicationRecord, SourceError>> + Send;
}

/// Reasons a record could not be obtained. All of them are per-request and recoverable.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("application id {0:?} cannot be used as a record path segment")]
    InvalidId(ApplicationId),
    #[error("application {0} was not found")]
    NotFound(ApplicationId),
    #[error("source responded with HTTP {status}")]
    Status { status: u16 },
    #[error("source request timed out")]
    Timeout,
    #[error("source unreachable: {0}")]
    Transport(String),
    #[error("malformed application payload: {0}")]
    Decode(String),
}

impl SourceError {
    /// Stable machine-readable label used in logs and JSON responses.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::InvalidId(_) => "invalid_id",
            SourceError::NotFound(_) => "not_found",
            SourceError::Status { .. } => "upstream_status",
            SourceError::Timeout => "timeout",
            SourceError::Transport(_) => "transport",
            SourceError::Decode(_) => "decode",
        }
    }

    /// Fixed wording safe to show to dashboard viewers. The `Display` text may carry upstream
    /// URLs and belongs in logs only.
    pub fn public_message(&self) -> &'static str {
        match self {
            SourceError::InvalidId(_) => "The requested application id is not valid.",
            SourceError::NotFound(_) => "The application record was not found.",
            SourceError::Status { .. } => "The application service returned an error.",
            SourceError::Timeout => "The application service did not respond in time.",
            SourceError::Transport(_) => "The application service could not be reached.",
            SourceError::Decode(_) => "The application service returned an unreadable record.",
        }
    }
}
