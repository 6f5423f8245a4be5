use crate::models::{Match, NewMatch, NewSwipe, PairKey, Profile, ProfileUpdate, Swipe, SwipeDirection};
use crate::services::store::{MatchStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

/// Table names in the hosted database
#[derive(Debug, Clone)]
pub struct RestTables {
    pub profiles: String,
    pub swipes: String,
    pub matches: String,
}

impl Default for RestTables {
    fn default() -> Self {
        Self {
            profiles: "profiles".to_string(),
            swipes: "swipes".to_string(),
            matches: "matches".to_string(),
        }
    }
}

/// Client for the hosted backend's REST (PostgREST-style) table API.
///
/// The hosted `matches` table must carry a unique constraint on
/// `(user1_id, user2_id)`. The backend answers a conflicting match insert
/// with HTTP 409 and code `23505`, which is surfaced as
/// [`StoreError::DuplicateMatch`].
pub struct RestStore {
    base_url: String,
    api_key: String,
    client: Client,
    tables: RestTables,
}

impl RestStore {
    /// Create a new REST store client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: RestTables,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
    }

    /// Send a request and decode the returned rows
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Vec<T>, StoreError> {
        let response = self.authorize(request).send().await?;
        decode_rows(response, action).await
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = self.fetch_rows(request, action).await?;
        Ok(rows.into_iter().next())
    }


    async fn delete_by_id(&self, table: &str, id: Uuid) -> Result<bool, StoreError> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        let request = self
            .client
            .delete(&url)
            .header("Prefer", "return=representation");

        let deleted: Vec<Value> = self.fetch_rows(request, "delete row").await?;
        Ok(!deleted.is_empty())
    }
}

/// Check the status and decode the returned rows.
///
/// A 409 is reported as [`StoreError::ApiError`] here; only the match insert
/// turns a unique violation into [`StoreError::DuplicateMatch`].
async fn decode_rows<T: DeserializeOwned>(response: Response, action: &str) -> Result<Vec<T>, StoreError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Failed to {}: {} - {}", action, status, body);
        return Err(StoreError::ApiError(format!("Failed to {}: {}", action, status)));
    }

    let json: Value = response.json().await?;
    let rows = json
        .as_array()
        .ok_or_else(|| StoreError::InvalidResponse(format!("Expected row array when trying to {}", action)))?;

    rows.iter()
        .map(|row| {
            serde_json::from_value(row.clone())
                .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse row: {}", e)))
        })
        .collect()
}

/// PostgreSQL error code for `unique_violation`, as reported in PostgREST error bodies
const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("code").and_then(Value::as_str).map(|code| code == UNIQUE_VIOLATION))
        .unwrap_or(false)
}

#[async_trait]
impl MatchStore for RestStore {
    async fn list_profiles(&self, excluding: Uuid) -> Result<Vec<Profile>, StoreError> {
        let url = format!(
            "{}?select=*&id=neq.{}&order=created_at.asc",
            self.table_url(&self.tables.profiles),
            excluding
        );

        tracing::debug!("Listing profiles excluding {}", excluding);
        self.fetch_rows(self.client.get(&url), "list profiles").await
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        let url = format!("{}?select=*&id=eq.{}", self.table_url(&self.tables.profiles), id);
        self.fetch_one(self.client.get(&url), "fetch profile").await
    }

    async fn upsert_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile, StoreError> {
        let url = format!("{}?on_conflict=id", self.table_url(&self.tables.profiles));

        let mut payload = serde_json::to_value(update)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to encode profile: {}", e)))?;
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("id".to_string(), json!(id));
            obj.insert("updated_at".to_string(), json!(chrono::Utc::now()));
        }

        let request = self
            .client
            .post(&url)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&payload);

        self.fetch_one(request, "upsert profile")
            .await?
            .ok_or_else(|| StoreError::InvalidResponse("Upsert returned no row".into()))
    }

    async fn list_swipes(&self, swiper_id: Uuid) -> Result<Vec<Swipe>, StoreError> {
        let url = format!(
            "{}?select=*&swiper_id=eq.{}&order=created_at.desc",
            self.table_url(&self.tables.swipes),
            swiper_id
        );
        self.fetch_rows(self.client.get(&url), "list swipes").await
    }

    async fn insert_swipe(&self, swipe: NewSwipe) -> Result<Swipe, StoreError> {
        let url = self.table_url(&self.tables.swipes);
        let payload = json!({
            "id": Uuid::new_v4(),
            "swiper_id": swipe.swiper_id,
            "swiped_id": swipe.swiped_id,
            "direction": swipe.direction,
            "created_at": swipe.created_at,
        });

        let request = self
            .client
            .post(&url)
            .header("Prefer", "return=representation")
            .json(&payload);

        let row = self
            .fetch_one(request, "insert swipe")
            .await?
            .ok_or_else(|| StoreError::InvalidResponse("Insert returned no row".into()))?;

        tracing::debug!("Inserted swipe {} -> {} ({})", swipe.swiper_id, swipe.swiped_id, swipe.direction);
        Ok(row)
    }

    async fn find_reverse_accept_swipe(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>, StoreError> {
        let accepting = SwipeDirection::ACCEPTING
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let filter = format!("in.({})", accepting);

        let url = format!(
            "{}?select=*&swiper_id=eq.{}&swiped_id=eq.{}&direction={}&order=created_at.asc&limit=1",
            self.table_url(&self.tables.swipes),
            from,
            to,
            urlencoding::encode(&filter)
        );
        self.fetch_one(self.client.get(&url), "find reverse swipe").await
    }

    async fn delete_swipe(&self, id: Uuid) -> Result<bool, StoreError> {
        self.delete_by_id(&self.tables.swipes, id).await
    }

    /// Rows written by older clients are not sorted, so both column orders are searched.
    async fn find_match(&self, pair: PairKey) -> Result<Option<Match>, StoreError> {
        let (low, high) = (pair.low(), pair.high());
        let filter = format!(
            "(and(user1_id.eq.{},user2_id.eq.{}),and(user1_id.eq.{},user2_id.eq.{}))",
            low, high, high, low
        );
        let url = format!(
            "{}?select=*&or={}&order=created_at.asc&limit=1",
            self.table_url(&self.tables.matches),
            urlencoding::encode(&filter)
        );
        self.fetch_one(self.client.get(&url), "find match").await
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<Match>, StoreError> {
        let url = format!("{}?select=*&id=eq.{}", self.table_url(&self.tables.matches), id);
        self.fetch_one(self.client.get(&url), "fetch match").await
    }

    async fn list_matches(&self, user_id: Uuid) -> Result<Vec<Match>, StoreError> {
        let filter = format!("(user1_id.eq.{},user2_id.eq.{})", user_id, user_id);
        let url = format!(
            "{}?select=*&or={}&order=created_at.desc",
            self.table_url(&self.tables.matches),
            urlencoding::encode(&filter)
        );
        self.fetch_rows(self.client.get(&url), "list matches").await
    }

    async fn insert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let url = self.table_url(&self.tables.matches);
        let payload = json!({
            "id": Uuid::new_v4(),
            "user1_id": new_match.pair.low(),
            "user2_id": new_match.pair.high(),
            "status": new_match.status,
            "match_percentage": new_match.match_percentage,
            "created_at": new_match.created_at,
        });

        let request = self
            .client
            .post(&url)
            .header("Prefer", "return=representation")
            .json(&payload);

        let response = self.authorize(request).send().await?;

        if response.status() == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            if is_unique_violation(&body) {
                return Err(StoreError::DuplicateMatch);
            }
            tracing::error!("Failed to insert match: 409 - {}", body);
            return Err(StoreError::ApiError("Failed to insert match: 409 Conflict".to_string()));
        }

        let rows: Vec<Match> = decode_rows(response, "insert match").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse("Insert returned no row".into()))
    }

    async fn delete_match(&self, id: Uuid) -> Result<bool, StoreError> {
        self.delete_by_id(&self.tables.matches, id).await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let url = format!("{}?select=id&limit=1", self.table_url(&self.tables.profiles));
        let rows: Vec<Value> = self.fetch_rows(self.client.get(&url), "check health").await?;
        Ok(rows.len() <= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_unique_violation(r#"{"code":"23505","message":"duplicate key"}"#));
        assert!(!is_unique_violation(r#"{"code":"23503","message":"foreign key"}"#));
        assert!(!is_unique_violation("not json"));
    }

    #[test]
    fn test_rest_store_creation() {
        let store = RestStore::new(
            "https://project.example.co/".to_string(),
            "test_key".to_string(),
            RestTables::default(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(store.table_url("swipes"), "https://project.example.co/rest/v1/swipes");
        assert_eq!(store.api_key, "test_key");
    }
}
