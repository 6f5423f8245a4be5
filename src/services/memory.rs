use crate::models::{Match, NewMatch, NewSwipe, PairKey, Profile, ProfileUpdate, Swipe};
use crate::services::store::{MatchStore, StoreError};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Store operations that can be made to fail on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ListProfiles,
    GetProfile,
    UpsertProfile,
    ListSwipes,
    InsertSwipe,
    FindReverseSwipe,
    DeleteSwipe,
    FindMatch,
    GetMatch,
    ListMatches,
    InsertMatch,
    DeleteMatch,
}

#[derive(Debug, Default)]
struct Tables {
    profiles: Vec<Profile>,
    swipes: Vec<Swipe>,
    matches: Vec<Match>,
    failing: HashSet<StoreOp>,
}

/// In-process store for local development and tests.
///
/// All tables live behind one mutex, so the pair uniqueness check and the
/// insert in [`MatchStore::insert_match`] happen atomically, the same way the
/// unique index does for PostgreSQL.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with the given profiles
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                profiles,
                ..Tables::default()
            }),
        }
    }

    pub async fn add_profile(&self, profile: Profile) {
        self.tables.lock().await.profiles.push(profile);
    }

    /// Make every call of `op` fail until [`MemoryStore::recover`] is called
    pub async fn fail_on(&self, op: StoreOp) {
        self.tables.lock().await.failing.insert(op);
    }

    pub async fn recover(&self) {
        self.tables.lock().await.failing.clear();
    }

    pub async fn swipe_count(&self) -> usize {
        self.tables.lock().await.swipes.len()
    }

    pub async fn match_count(&self) -> usize {
        self.tables.lock().await.matches.len()
    }
}

impl Tables {
    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if self.failing.contains(&op) {
            return Err(StoreError::ApiError(format!("{:?} unavailable", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn list_profiles(&self, excluding: Uuid) -> Result<Vec<Profile>, StoreError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::ListProfiles)?;
        Ok(tables
            .profiles
            .iter()
            .filter(|p| p.id != excluding)
            .cloned()
            .collect())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::GetProfile)?;
        Ok(tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn upsert_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.check(StoreOp::UpsertProfile)?;
        let now = chrono::Utc::now();

        if let Some(existing) = tables.profiles.iter_mut().find(|p| p.id == id) {
            existing.apply(update);
            existing.updated_at = Some(now);
            return Ok(existing.clone());
        }

        let mut profile = Profile::empty(id);
        profile.apply(update);
        profile.created_at = Some(now);
        profile.updated_at = Some(now);
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn list_swipes(&self, swiper_id: Uuid) -> Result<Vec<Swipe>, StoreError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::ListSwipes)?;
        let mut swipes: Vec<Swipe> = tables
            .swipes
            .iter()
            .filter(|s| s.swiper_id == swiper_id)
            .cloned()
            .collect();
        swipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(swipes)
    }

    async fn insert_swipe(&self, swipe: NewSwipe) -> Result<Swipe, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.check(StoreOp::InsertSwipe)?;
        let row = Swipe {
            id: Uuid::new_v4(),
            swiper_id: swipe.swiper_id,
            swiped_id: swipe.swiped_id,
            direction: swipe.direction,
            created_at: swipe.created_at,
        };
        tables.swipes.push(row.clone());
        Ok(row)
    }

    async fn find_reverse_accept_swipe(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>, StoreError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::FindReverseSwipe)?;
        Ok(tables
            .swipes
            .iter()
            .find(|s| s.swiper_id == from && s.swiped_id == to && s.direction.is_accept())
            .cloned())
    }

    async fn delete_swipe(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.check(StoreOp::DeleteSwipe)?;
        let before = tables.swipes.len();
        tables.swipes.retain(|s| s.id != id);
        Ok(tables.swipes.len() < before)
    }

    async fn find_match(&self, pair: PairKey) -> Result<Option<Match>, StoreError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::FindMatch)?;
        Ok(tables.matches.iter().find(|m| m.pair() == pair).cloned())
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<Match>, StoreError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::GetMatch)?;
        Ok(tables.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn list_matches(&self, user_id: Uuid) -> Result<Vec<Match>, StoreError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::ListMatches)?;
        let mut matches: Vec<Match> = tables
            .matches
            .iter()
            .filter(|m| m.pair().contains(user_id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn insert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.check(StoreOp::InsertMatch)?;

        if tables.matches.iter().any(|m| m.pair() == new_match.pair) {
            return Err(StoreError::DuplicateMatch);
        }

        let row = Match {
            id: Uuid::new_v4(),
            user1_id: new_match.pair.low(),
            user2_id: new_match.pair.high(),
            status: new_match.status,
            match_percentage: new_match.match_percentage,
            created_at: new_match.created_at,
        };
        tables.matches.push(row.clone());
        Ok(row)
    }

    async fn delete_match(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.check(StoreOp::DeleteMatch)?;
        let before = tables.matches.len();
        tables.matches.retain(|m| m.id != id);
        Ok(tables.matches.len() < before)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
