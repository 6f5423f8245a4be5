use crate::core::{
    feed::build_feed,
    matches::{matches_overview, unmatch},
    onboarding::{complete_onboarding, own_profile},
    reconciler::{reconcile, ReconcileOutcome},
    scoring::MatchScorer,
    session::Session,
    swipe::{delete_swipe, record_swipe},
};
use crate::error::MatchError;
use crate::models::{MatchesOverview, OnboardingDraft, Profile, Swipe, SwipeDirection};
use crate::services::MatchStore;
use std::sync::Arc;
use uuid::Uuid;

/// Result of a full swipe: the stored row and what reconciliation found
#[derive(Debug, Clone)]
pub struct SwipeResult {
    pub swipe: Swipe,
    pub outcome: ReconcileOutcome,
}

/// Entry point used by the HTTP layer.
///
/// # Swipe flow
/// 1. Record the swipe and wait for the insert to complete
/// 2. For accept kinds, look for the reverse accept
/// 3. Create the match once, tolerating a concurrent creator
#[derive(Clone)]
pub struct MatchEngine {
    store: Arc<dyn MatchStore>,
    scorer: Arc<dyn MatchScorer>,
}

impl MatchEngine {
    pub fn new(store: Arc<dyn MatchStore>, scorer: Arc<dyn MatchScorer>) -> Self {
        Self { store, scorer }
    }

    pub fn store(&self) -> &dyn MatchStore {
        self.store.as_ref()
    }

    pub async fn feed(&self, session: &Session) -> Result<Vec<Profile>, MatchError> {
        build_feed(self.store.as_ref(), session).await
    }

    /// Record a swipe, then reconcile it.
    ///
    /// Reconciliation only starts after the insert has returned, so a pair
    /// whose second accept was just written is never missed.
    pub async fn swipe(
        &self,
        session: &Session,
        swiped_id: Uuid,
        direction: SwipeDirection,
    ) -> Result<SwipeResult, MatchError> {
        let swipe = record_swipe(self.store.as_ref(), session, swiped_id, direction).await?;
        let outcome = reconcile(self.store.as_ref(), self.scorer.as_ref(), &swipe).await?;

        Ok(SwipeResult { swipe, outcome })
    }

    pub async fn reconcile(&self, swipe: &Swipe) -> Result<ReconcileOutcome, MatchError> {
        reconcile(self.store.as_ref(), self.scorer.as_ref(), swipe).await
    }

    pub async fn delete_swipe(&self, session: &Session, swipe_id: Uuid) -> Result<(), MatchError> {
        delete_swipe(self.store.as_ref(), session, swipe_id).await
    }

    pub async fn matches(&self, session: &Session) -> Result<MatchesOverview, MatchError> {
        matches_overview(self.store.as_ref(), session).await
    }

    pub async fn unmatch(&self, session: &Session, match_id: Uuid) -> Result<usize, MatchError> {
        unmatch(self.store.as_ref(), session, match_id).await
    }

    pub async fn profile(&self, session: &Session) -> Result<(Option<Profile>, bool), MatchError> {
        own_profile(self.store.as_ref(), session).await
    }

    pub async fn complete_onboarding(
        &self,
        session: &Session,
        draft: &OnboardingDraft,
    ) -> Result<Profile, MatchError> {
        complete_onboarding(self.store.as_ref(), session, draft).await
    }
}
