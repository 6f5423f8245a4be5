use serde::{Deserialize, Serialize};
use crate::models::domain::{Match, Profile, Swipe};

/// Response for the discovery feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub profiles: Vec<Profile>,
    pub total_results: usize,
}

/// Response for a recorded swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub swipe: Swipe,
    /// True only for the request that created the match
    pub matched: bool,
    #[serde(rename = "match")]
    pub new_match: Option<Match>,
}

/// A match together with the other member's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedProfile {
    pub match_id: uuid::Uuid,
    pub profile: Profile,
    pub match_percentage: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One of the caller's own swipes together with the target's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipedProfile {
    pub swipe: Swipe,
    pub profile: Profile,
}

/// Response for the matches screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchesOverview {
    pub matches: Vec<MatchedProfile>,
    pub accepted: Vec<SwipedProfile>,
    pub rejected: Vec<SwipedProfile>,
}

/// Own profile plus onboarding state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Option<Profile>,
    pub needs_onboarding: bool,
}

/// Result of a delete operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_swipes: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
