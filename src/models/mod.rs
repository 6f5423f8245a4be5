// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, ProfileUpdate, Swipe, NewSwipe, SwipeDirection, PairKey, Match, MatchStatus, NewMatch, ScoringWeights};
pub use requests::{SwipeRequest, OnboardingDraft, BasicInfo};
pub use responses::{FeedResponse, SwipeResponse, MatchedProfile, SwipedProfile, MatchesOverview, ProfileResponse, DeleteResponse, HealthResponse, ErrorResponse};
