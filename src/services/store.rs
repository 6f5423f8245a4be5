use crate::models::{Match, NewMatch, NewSwipe, PairKey, Profile, ProfileUpdate, Swipe};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when talking to a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// A match row for the same unordered pair already exists
    #[error("Match already exists for this pair")]
    DuplicateMatch,

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Data access used by the swipe, match and feed logic.
///
/// Implementations must reject a second match for the same [`PairKey`] with
/// [`StoreError::DuplicateMatch`] atomically, since two devices can reconcile
/// the same pair at the same time.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// All profiles except `excluding`, in the store's natural order
    async fn list_profiles(&self, excluding: Uuid) -> Result<Vec<Profile>, StoreError>;

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError>;

    /// Create the profile if missing, otherwise overwrite its editable fields
    async fn upsert_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile, StoreError>;

    /// Swipes authored by `swiper_id`, newest first
    async fn list_swipes(&self, swiper_id: Uuid) -> Result<Vec<Swipe>, StoreError>;

    async fn insert_swipe(&self, swipe: NewSwipe) -> Result<Swipe, StoreError>;

    /// Any accept or strong-accept swipe made by `from` about `to`
    async fn find_reverse_accept_swipe(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>, StoreError>;

    async fn delete_swipe(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn find_match(&self, pair: PairKey) -> Result<Option<Match>, StoreError>;

    async fn get_match(&self, id: Uuid) -> Result<Option<Match>, StoreError>;

    /// Matches involving `user_id`, newest first
    async fn list_matches(&self, user_id: Uuid) -> Result<Vec<Match>, StoreError>;

    async fn insert_match(&self, new_match: NewMatch) -> Result<Match, StoreError>;

    async fn delete_match(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
