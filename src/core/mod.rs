// Core logic exports
pub mod engine;
pub mod feed;
pub mod matches;
pub mod onboarding;
pub mod reconciler;
pub mod scoring;
pub mod session;
pub mod swipe;

pub use engine::{MatchEngine, SwipeResult};
pub use feed::{build_feed, filter_unswiped};
pub use matches::{matches_overview, unmatch};
pub use onboarding::{assemble_profile, complete_onboarding, needs_onboarding, own_profile};
pub use reconciler::{reconcile, ReconcileOutcome};
pub use scoring::{MatchScorer, TagOverlapScorer};
pub use session::Session;
pub use swipe::{delete_swipe, parse_direction, record_swipe};
