use crate::core::session::Session;
use crate::error::MatchError;
use crate::models::{NewSwipe, Swipe, SwipeDirection};
use crate::services::MatchStore;
use chrono::Utc;
use uuid::Uuid;

/// Persist one decision by the session's user about `swiped_id`.
///
/// No dedup happens here: swiping twice on the same member stores two rows.
pub async fn record_swipe(
    store: &dyn MatchStore,
    session: &Session,
    swiped_id: Uuid,
    direction: SwipeDirection,
) -> Result<Swipe, MatchError> {
    let swiper_id = session.require()?;

    if swiper_id == swiped_id {
        return Err(MatchError::InvalidSwipe("cannot swipe on your own profile".to_string()));
    }

    let swipe = store
        .insert_swipe(NewSwipe {
            swiper_id,
            swiped_id,
            direction,
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!("Recorded swipe {}: {} -> {} ({})", swipe.id, swiper_id, swiped_id, direction);

    Ok(swipe)
}

/// Parse a direction coming from a client request
pub fn parse_direction(raw: &str) -> Result<SwipeDirection, MatchError> {
    raw.parse().map_err(MatchError::InvalidSwipe)
}

/// Delete one of the session user's own swipes
pub async fn delete_swipe(store: &dyn MatchStore, session: &Session, swipe_id: Uuid) -> Result<(), MatchError> {
    let user_id = session.require()?;

    let owned = store
        .list_swipes(user_id)
        .await?
        .iter()
        .any(|s| s.id == swipe_id);

    if !owned || !store.delete_swipe(swipe_id).await? {
        return Err(MatchError::NotFound(format!("swipe {}", swipe_id)));
    }

    tracing::info!("User {} deleted swipe {}", user_id, swipe_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    #[tokio::test]
    async fn test_self_swipe_is_rejected_without_insert() {
        let store = MemoryStore::new();
        let me = Uuid::new_v4();

        let result = record_swipe(&store, &Session::authenticated(me), me, SwipeDirection::Accept).await;

        assert!(matches!(result, Err(MatchError::InvalidSwipe(_))));
        assert_eq!(store.swipe_count().await, 0);
    }

    #[tokio::test]
    async fn test_anonymous_swipe_is_rejected() {
        let store = MemoryStore::new();
        let result = record_swipe(&store, &Session::anonymous(), Uuid::new_v4(), SwipeDirection::Reject).await;

        assert!(matches!(result, Err(MatchError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_duplicate_decisions_are_stored() {
        let store = MemoryStore::new();
        let session = Session::authenticated(Uuid::new_v4());
        let target = Uuid::new_v4();

        let first = record_swipe(&store, &session, target, SwipeDirection::Reject).await.unwrap();
        let second = record_swipe(&store, &session, target, SwipeDirection::Accept).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.swipe_count().await, 2);
    }

    #[test]
    fn test_malformed_direction() {
        assert!(matches!(parse_direction("up"), Err(MatchError::InvalidSwipe(_))));
        assert_eq!(parse_direction("superlike").unwrap(), SwipeDirection::StrongAccept);
    }

    #[tokio::test]
    async fn test_cannot_delete_someone_elses_swipe() {
        let store = MemoryStore::new();
        let owner = Session::authenticated(Uuid::new_v4());
        let stranger = Session::authenticated(Uuid::new_v4());
        let swipe = record_swipe(&store, &owner, Uuid::new_v4(), SwipeDirection::Accept).await.unwrap();

        let result = delete_swipe(&store, &stranger, swipe.id).await;
        assert!(matches!(result, Err(MatchError::NotFound(_))));

        delete_swipe(&store, &owner, swipe.id).await.unwrap();
        assert_eq!(store.swipe_count().await, 0);
    }
}
