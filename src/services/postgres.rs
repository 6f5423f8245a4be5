use crate::models::{Match, MatchStatus, NewMatch, NewSwipe, PairKey, Profile, ProfileUpdate, Swipe, SwipeDirection};
use crate::services::store::{MatchStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

const PROFILE_COLUMNS: &str = r#"
    id, email, name, age, gender, country, languages, roles, stage, skills,
    interests, looking_for, skills_looking_for, languages_looking_for,
    countries_looking_for, bio, photo_urls, linkedin_url, github_url,
    twitter_url, website_url, instagram_url, tiktok_url, youtube_url,
    other_url, created_at, updated_at
"#;

/// PostgreSQL-backed store.
///
/// Schema lives in `./migrations` and is applied on connect. The
/// `matches_pair_unique` constraint is what keeps concurrent reconcilers from
/// creating two matches for the same pair.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn profile_from_row(row: &PgRow) -> Result<Profile, StoreError> {
    Ok(Profile {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        country: row.try_get("country")?,
        languages: row.try_get("languages")?,
        roles: row.try_get("roles")?,
        stage: row.try_get("stage")?,
        skills: row.try_get("skills")?,
        interests: row.try_get("interests")?,
        looking_for: row.try_get("looking_for")?,
        skills_looking_for: row.try_get("skills_looking_for")?,
        languages_looking_for: row.try_get("languages_looking_for")?,
        countries_looking_for: row.try_get("countries_looking_for")?,
        bio: row.try_get("bio")?,
        photo_urls: row.try_get("photo_urls")?,
        linkedin_url: row.try_get("linkedin_url")?,
        github_url: row.try_get("github_url")?,
        twitter_url: row.try_get("twitter_url")?,
        website_url: row.try_get("website_url")?,
        instagram_url: row.try_get("instagram_url")?,
        tiktok_url: row.try_get("tiktok_url")?,
        youtube_url: row.try_get("youtube_url")?,
        other_url: row.try_get("other_url")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn swipe_from_row(row: &PgRow) -> Result<Swipe, StoreError> {
    let direction: String = row.try_get("direction")?;
    Ok(Swipe {
        id: row.try_get("id")?,
        swiper_id: row.try_get("swiper_id")?,
        swiped_id: row.try_get("swiped_id")?,
        direction: direction.parse().map_err(StoreError::InvalidResponse)?,
        created_at: row.try_get("created_at")?,
    })
}

fn match_from_row(row: &PgRow) -> Result<Match, StoreError> {
    let status: String = row.try_get("status")?;
    Ok(Match {
        id: row.try_get("id")?,
        user1_id: row.try_get("user1_id")?,
        user2_id: row.try_get("user2_id")?,
        status: status.parse().map_err(StoreError::InvalidResponse)?,
        match_percentage: row.try_get("match_percentage")?,
        created_at: row.try_get("created_at")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl MatchStore for PostgresStore {
    async fn list_profiles(&self, excluding: Uuid) -> Result<Vec<Profile>, StoreError> {
        let query = format!(
            "SELECT {} FROM profiles WHERE id <> $1 ORDER BY created_at, id",
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query).bind(excluding).fetch_all(&self.pool).await?;
        let profiles = rows.iter().map(profile_from_row).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Listed {} profiles excluding {}", profiles.len(), excluding);
        Ok(profiles)
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        let query = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(profile_from_row).transpose()
    }

    async fn upsert_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile, StoreError> {
        let query = format!(
            r#"
            INSERT INTO profiles (
                id, email, name, age, gender, country, languages, roles, stage, skills,
                interests, looking_for, skills_looking_for, languages_looking_for,
                countries_looking_for, bio, photo_urls, linkedin_url, github_url,
                twitter_url, website_url, instagram_url, tiktok_url, youtube_url,
                other_url, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25, NOW(), NOW()
            )
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                country = EXCLUDED.country,
                languages = EXCLUDED.languages,
                roles = EXCLUDED.roles,
                stage = EXCLUDED.stage,
                skills = EXCLUDED.skills,
                interests = EXCLUDED.interests,
                looking_for = EXCLUDED.looking_for,
                skills_looking_for = EXCLUDED.skills_looking_for,
                languages_looking_for = EXCLUDED.languages_looking_for,
                countries_looking_for = EXCLUDED.countries_looking_for,
                bio = EXCLUDED.bio,
                photo_urls = EXCLUDED.photo_urls,
                linkedin_url = EXCLUDED.linkedin_url,
                github_url = EXCLUDED.github_url,
                twitter_url = EXCLUDED.twitter_url,
                website_url = EXCLUDED.website_url,
                instagram_url = EXCLUDED.instagram_url,
                tiktok_url = EXCLUDED.tiktok_url,
                youtube_url = EXCLUDED.youtube_url,
                other_url = EXCLUDED.other_url,
                updated_at = NOW()
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(&update.email)
            .bind(&update.name)
            .bind(update.age)
            .bind(&update.gender)
            .bind(&update.country)
            .bind(&update.languages)
            .bind(&update.roles)
            .bind(&update.stage)
            .bind(&update.skills)
            .bind(&update.interests)
            .bind(&update.looking_for)
            .bind(&update.skills_looking_for)
            .bind(&update.languages_looking_for)
            .bind(&update.countries_looking_for)
            .bind(&update.bio)
            .bind(&update.photo_urls)
            .bind(&update.linkedin_url)
            .bind(&update.github_url)
            .bind(&update.twitter_url)
            .bind(&update.website_url)
            .bind(&update.instagram_url)
            .bind(&update.tiktok_url)
            .bind(&update.youtube_url)
            .bind(&update.other_url)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Upserted profile {}", id);
        profile_from_row(&row)
    }

    async fn list_swipes(&self, swiper_id: Uuid) -> Result<Vec<Swipe>, StoreError> {
        let query = r#"
            SELECT id, swiper_id, swiped_id, direction, created_at
            FROM swipes
            WHERE swiper_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(swiper_id).fetch_all(&self.pool).await?;
        rows.iter().map(swipe_from_row).collect()
    }

    async fn insert_swipe(&self, swipe: NewSwipe) -> Result<Swipe, StoreError> {
        let query = r#"
            INSERT INTO swipes (id, swiper_id, swiped_id, direction, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, swiper_id, swiped_id, direction, created_at
        "#;

        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(swipe.swiper_id)
            .bind(swipe.swiped_id)
            .bind(swipe.direction.as_str())
            .bind(swipe.created_at)
            .fetch_one(&self.pool)
            .await?;

        swipe_from_row(&row)
    }

    async fn find_reverse_accept_swipe(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>, StoreError> {
        let query = r#"
            SELECT id, swiper_id, swiped_id, direction, created_at
            FROM swipes
            WHERE swiper_id = $1 AND swiped_id = $2 AND direction = ANY($3)
            ORDER BY created_at
            LIMIT 1
        "#;

        let accepting: Vec<String> = SwipeDirection::ACCEPTING
            .iter()
            .map(|d| d.as_str().to_string())
            .collect();

        let row = sqlx::query(query)
            .bind(from)
            .bind(to)
            .bind(&accepting)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(swipe_from_row).transpose()
    }

    async fn delete_swipe(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM swipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_match(&self, pair: PairKey) -> Result<Option<Match>, StoreError> {
        let query = r#"
            SELECT id, user1_id, user2_id, status, match_percentage, created_at
            FROM matches
            WHERE user1_id = $1 AND user2_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(pair.low())
            .bind(pair.high())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(match_from_row).transpose()
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<Match>, StoreError> {
        let query = r#"
            SELECT id, user1_id, user2_id, status, match_percentage, created_at
            FROM matches
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(match_from_row).transpose()
    }

    async fn list_matches(&self, user_id: Uuid) -> Result<Vec<Match>, StoreError> {
        let query = r#"
            SELECT id, user1_id, user2_id, status, match_percentage, created_at
            FROM matches
            WHERE user1_id = $1 OR user2_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;
        rows.iter().map(match_from_row).collect()
    }

    /// Uses `ON CONFLICT DO NOTHING` so the losing writer of a race gets
    /// [`StoreError::DuplicateMatch`] instead of a second row.
    async fn insert_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let query = r#"
            INSERT INTO matches (id, user1_id, user2_id, status, match_percentage, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT ON CONSTRAINT matches_pair_unique DO NOTHING
            RETURNING id, user1_id, user2_id, status, match_percentage, created_at
        "#;

        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(new_match.pair.low())
            .bind(new_match.pair.high())
            .bind(new_match.status.as_str())
            .bind(new_match.match_percentage)
            .bind(new_match.created_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateMatch
                } else {
                    StoreError::from(e)
                }
            })?;

        match row {
            Some(row) => match_from_row(&row),
            None => Err(StoreError::DuplicateMatch),
        }
    }

    async fn delete_match(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
