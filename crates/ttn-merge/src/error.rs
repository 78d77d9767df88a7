//! Error types for the merge crate.

use crate::conflict::ConflictReport;

/// Errors that can abort a merge.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The policy was `reject` and at least one conflict occurred. The merge
    /// was aborted atomically; the report carries every conflict found.
    #[error("merge rejected with {} conflict(s)", .0.len())]
    Conflict(ConflictReport),
}

impl MergeError {
    /// The conflict report carried by this error.
    pub fn report(&self) -> &ConflictReport {
        match self {
            Self::Conflict(report) => report,
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
