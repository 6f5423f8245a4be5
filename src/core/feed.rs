use crate::core::session::Session;
use crate::error::MatchError;
use crate::models::{Profile, Swipe};
use crate::services::MatchStore;
use std::collections::HashSet;
use uuid::Uuid;

/// Build the discovery feed for the session's user.
///
/// Both reads are issued together and the filter only runs once both have
/// arrived. If either read fails the whole feed fails with
/// [`MatchError::FeedUnavailable`].
pub async fn build_feed(store: &dyn MatchStore, session: &Session) -> Result<Vec<Profile>, MatchError> {
    let user_id = session.require()?;

    let (profiles, swipes) = tokio::try_join!(store.list_profiles(user_id), store.list_swipes(user_id))
        .map_err(|e| {
            tracing::warn!("Feed unavailable for {}: {}", user_id, e);
            MatchError::FeedUnavailable(e)
        })?;

    let total = profiles.len();
    let feed = filter_unswiped(user_id, profiles, &swipes);

    tracing::debug!("Feed for {}: {} of {} profiles not yet swiped", user_id, feed.len(), total);

    Ok(feed)
}

/// Keep the profiles `user_id` has not decided on yet, in their original order.
///
/// The user's own profile is dropped too, even if the store returned it.
pub fn filter_unswiped(user_id: Uuid, profiles: Vec<Profile>, swipes: &[Swipe]) -> Vec<Profile> {
    let swiped: HashSet<Uuid> = swipes
        .iter()
        .filter(|s| s.swiper_id == user_id)
        .map(|s| s.swiped_id)
        .collect();

    profiles
        .into_iter()
        .filter(|p| p.id != user_id && !swiped.contains(&p.id))
        .collect()
}
