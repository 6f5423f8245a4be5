//! DevMatch - swipe and match service for the DevMatch networking app
//!
//! This library records swipes between members, turns mutual accepts into
//! matches exactly once, and builds each member's discovery feed.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchEngine, ReconcileOutcome, Session, MatchScorer, TagOverlapScorer};
pub use error::MatchError;
pub use models::{Profile, Swipe, SwipeDirection, Match, PairKey};
pub use services::{MatchStore, StoreError, MemoryStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let a = uuid::Uuid::new_v4();
        let b = uuid::Uuid::new_v4();
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
    }
}
