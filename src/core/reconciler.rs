use crate::core::scoring::MatchScorer;
use crate::error::MatchError;
use crate::models::{Match, MatchStatus, NewMatch, PairKey, Swipe};
use crate::services::{MatchStore, StoreError};
use chrono::Utc;

/// What reconciling a swipe produced
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// No accept in the reverse direction (or the swipe was a reject)
    NoMatch,
    /// The pair was already matched, possibly by a concurrent reconciler
    AlreadyMatched(Match),
    /// This call created the match
    NewMatch(Match),
}

impl ReconcileOutcome {
    /// True only for the one call that created the match row
    pub fn is_new_match(&self) -> bool {
        matches!(self, ReconcileOutcome::NewMatch(_))
    }

    pub fn matched(&self) -> Option<&Match> {
        match self {
            ReconcileOutcome::NoMatch => None,
            ReconcileOutcome::AlreadyMatched(m) | ReconcileOutcome::NewMatch(m) => Some(m),
        }
    }
}

/// Create the mutual match for `swipe` if the other member already accepted.
///
/// Must run after `swipe` has been persisted. Two reconcilers for the same
/// pair may run at once (one per member); the store's pair uniqueness makes
/// exactly one of them report [`ReconcileOutcome::NewMatch`], the other gets
/// [`ReconcileOutcome::AlreadyMatched`] with the winning row.
pub async fn reconcile(
    store: &dyn MatchStore,
    scorer: &dyn MatchScorer,
    swipe: &Swipe,
) -> Result<ReconcileOutcome, MatchError> {
    if !swipe.direction.is_accept() {
        return Ok(ReconcileOutcome::NoMatch);
    }

    let reverse = store
        .find_reverse_accept_swipe(swipe.swiped_id, swipe.swiper_id)
        .await
        .map_err(MatchError::ReconciliationFailed)?;

    if reverse.is_none() {
        tracing::debug!("No reverse accept for {} -> {}", swipe.swiper_id, swipe.swiped_id);
        return Ok(ReconcileOutcome::NoMatch);
    }

    let pair = PairKey::new(swipe.swiper_id, swipe.swiped_id);

    if let Some(existing) = store.find_match(pair).await.map_err(MatchError::ReconciliationFailed)? {
        tracing::debug!("Pair {} / {} already matched as {}", pair.low(), pair.high(), existing.id);
        return Ok(ReconcileOutcome::AlreadyMatched(existing));
    }

    let match_percentage = score_pair(store, scorer, pair).await?;

    let insert = store
        .insert_match(NewMatch {
            pair,
            status: MatchStatus::Matched,
            match_percentage,
            created_at: Utc::now(),
        })
        .await;

    match insert {
        Ok(created) => {
            tracing::info!(
                "New match {} between {} and {} ({}%)",
                created.id,
                pair.low(),
                pair.high(),
                match_percentage
            );
            Ok(ReconcileOutcome::NewMatch(created))
        }
        Err(StoreError::DuplicateMatch) => {
            // Lost the race to the other member's reconciler
            let winner = store
                .find_match(pair)
                .await
                .map_err(MatchError::ReconciliationFailed)?
                .ok_or_else(|| {
                    MatchError::ReconciliationFailed(StoreError::NotFound(format!(
                        "match for {} / {} vanished after conflict",
                        pair.low(),
                        pair.high()
                    )))
                })?;

            tracing::debug!("Concurrent match insert for {} / {}, keeping {}", pair.low(), pair.high(), winner.id);
            Ok(ReconcileOutcome::AlreadyMatched(winner))
        }
        Err(e) => {
            tracing::error!("Failed to insert match for {} / {}: {}", pair.low(), pair.high(), e);
            Err(MatchError::ReconciliationFailed(e))
        }
    }
}

/// Match percentage for a pair; a missing profile scores 0
async fn score_pair(store: &dyn MatchStore, scorer: &dyn MatchScorer, pair: PairKey) -> Result<f64, MatchError> {
    let (low, high) = tokio::try_join!(store.get_profile(pair.low()), store.get_profile(pair.high()))
        .map_err(MatchError::ReconciliationFailed)?;

    Ok(match (low, high) {
        (Some(a), Some(b)) => scorer.score(&a, &b),
        _ => 0.0,
    })
}
