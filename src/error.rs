use crate::services::StoreError;
use thiserror::Error;

/// Errors surfaced by the swipe, match and feed operations
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("No authenticated user")]
    Unauthenticated,

    #[error("Invalid swipe: {0}")]
    InvalidSwipe(String),

    /// One of the reads backing the feed failed; no partial feed is returned
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(#[source] StoreError),

    /// A lookup or insert during match reconciliation failed
    #[error("Match reconciliation failed: {0}")]
    ReconciliationFailed(#[source] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl MatchError {
    /// Short machine-readable code for error responses
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::Unauthenticated => "unauthenticated",
            MatchError::InvalidSwipe(_) => "invalid_swipe",
            MatchError::FeedUnavailable(_) => "feed_unavailable",
            MatchError::ReconciliationFailed(_) => "reconciliation_failed",
            MatchError::NotFound(_) => "not_found",
            MatchError::Forbidden(_) => "forbidden",
            MatchError::InvalidProfile(_) => "invalid_profile",
            MatchError::Store(_) => "store_error",
        }
    }
}
