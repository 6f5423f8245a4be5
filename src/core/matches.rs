use crate::core::session::Session;
use crate::error::MatchError;
use crate::models::{MatchedProfile, MatchesOverview, Profile, SwipedProfile};
use crate::services::MatchStore;
use std::collections::HashMap;
use uuid::Uuid;

/// Everything the matches screen shows for the session user.
///
/// Matches and swipes keep the store's newest-first order. Entries whose
/// counterpart profile no longer exists are skipped.
pub async fn matches_overview(store: &dyn MatchStore, session: &Session) -> Result<MatchesOverview, MatchError> {
    let user_id = session.require()?;

    let (matches, swipes, profiles) = tokio::try_join!(
        store.list_matches(user_id),
        store.list_swipes(user_id),
        store.list_profiles(user_id),
    )?;

    let by_id: HashMap<Uuid, Profile> = profiles.into_iter().map(|p| (p.id, p)).collect();
    let mut overview = MatchesOverview::default();

    for m in matches {
        let Some(profile) = m.pair().other(user_id).and_then(|other| by_id.get(&other)) else {
            continue;
        };
        overview.matches.push(MatchedProfile {
            match_id: m.id,
            profile: profile.clone(),
            match_percentage: m.match_percentage,
            created_at: m.created_at,
        });
    }

    for swipe in swipes {
        let Some(profile) = by_id.get(&swipe.swiped_id).cloned() else {
            continue;
        };
        let accepted = swipe.direction.is_accept();
        let entry = SwipedProfile { swipe, profile };
        if accepted {
            overview.accepted.push(entry);
        } else {
            overview.rejected.push(entry);
        }
    }

    tracing::debug!(
        "Overview for {}: {} matches, {} accepted, {} rejected",
        user_id,
        overview.matches.len(),
        overview.accepted.len(),
        overview.rejected.len()
    );

    Ok(overview)
}

/// Remove a match and every swipe between its two members.
///
/// Swipes go first: if the match delete then fails, retrying still works
/// and the pair cannot be re-matched from stale accepts. Returns the number
/// of swipe rows removed.
pub async fn unmatch(store: &dyn MatchStore, session: &Session, match_id: Uuid) -> Result<usize, MatchError> {
    let user_id = session.require()?;

    let found = store
        .get_match(match_id)
        .await?
        .ok_or_else(|| MatchError::NotFound(format!("match {}", match_id)))?;

    let other = found
        .pair()
        .other(user_id)
        .ok_or_else(|| MatchError::Forbidden(format!("user is not part of match {}", match_id)))?;

    let (mine, theirs) = tokio::try_join!(store.list_swipes(user_id), store.list_swipes(other))?;

    let pair_swipes = mine
        .iter()
        .filter(|s| s.swiped_id == other)
        .chain(theirs.iter().filter(|s| s.swiped_id == user_id));

    let mut deleted = 0;
    for swipe in pair_swipes {
        if store.delete_swipe(swipe.id).await? {
            deleted += 1;
        }
    }

    // Another request removed the match while its swipes were being cleared
    if !store.delete_match(found.id).await? {
        return Err(MatchError::NotFound(format!("match {}", match_id)));
    }

    tracing::info!("User {} removed match {} ({} swipes deleted)", user_id, match_id, deleted);

    Ok(deleted)
}
