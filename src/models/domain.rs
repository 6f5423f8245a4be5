use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Profile of a DevMatch member, as stored in the `profiles` table.
///
/// Every attribute except `id` is optional so that freshly signed-up users
/// (who only have an id and email) still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i16>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub looking_for: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub skills_looking_for: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub languages_looking_for: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub countries_looking_for: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub tiktok_url: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub other_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// An empty profile, as created right after sign-up.
    pub fn empty(id: Uuid) -> Self {
        Self {
            id,
            email: None,
            name: None,
            age: None,
            gender: None,
            country: None,
            languages: Vec::new(),
            roles: Vec::new(),
            stage: None,
            skills: Vec::new(),
            interests: Vec::new(),
            looking_for: Vec::new(),
            skills_looking_for: Vec::new(),
            languages_looking_for: Vec::new(),
            countries_looking_for: Vec::new(),
            bio: None,
            photo_urls: Vec::new(),
            linkedin_url: None,
            github_url: None,
            twitter_url: None,
            website_url: None,
            instagram_url: None,
            tiktok_url: None,
            youtube_url: None,
            other_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overwrite the editable attributes with the values from `update`.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.email = update.email.clone();
        self.name = Some(update.name.clone());
        self.age = update.age;
        self.gender = update.gender.clone();
        self.country = update.country.clone();
        self.languages = update.languages.clone();
        self.roles = update.roles.clone();
        self.stage = update.stage.clone();
        self.skills = update.skills.clone();
        self.interests = update.interests.clone();
        self.looking_for = update.looking_for.clone();
        self.skills_looking_for = update.skills_looking_for.clone();
        self.languages_looking_for = update.languages_looking_for.clone();
        self.countries_looking_for = update.countries_looking_for.clone();
        self.bio = update.bio.clone();
        self.photo_urls = update.photo_urls.clone();
        self.linkedin_url = update.linkedin_url.clone();
        self.github_url = update.github_url.clone();
        self.twitter_url = update.twitter_url.clone();
        self.website_url = update.website_url.clone();
        self.instagram_url = update.instagram_url.clone();
        self.tiktok_url = update.tiktok_url.clone();
        self.youtube_url = update.youtube_url.clone();
        self.other_url = update.other_url.clone();
    }
}

/// Arrays come back as `null` from the hosted backend when never written.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Editable profile attributes written at the end of onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub name: String,
    pub age: Option<i16>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub languages: Vec<String>,
    pub roles: Vec<String>,
    pub stage: Option<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub looking_for: Vec<String>,
    pub skills_looking_for: Vec<String>,
    pub languages_looking_for: Vec<String>,
    pub countries_looking_for: Vec<String>,
    pub bio: Option<String>,
    pub photo_urls: Vec<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub youtube_url: Option<String>,
    pub other_url: Option<String>,
}

/// Decision one member makes about another.
///
/// The wire names are the ones stored in the `swipes.direction` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    #[serde(rename = "left")]
    Reject,
    #[serde(rename = "right")]
    Accept,
    #[serde(rename = "superlike")]
    StrongAccept,
}

impl SwipeDirection {
    /// Directions that count towards a mutual match.
    pub const ACCEPTING: [SwipeDirection; 2] = [SwipeDirection::Accept, SwipeDirection::StrongAccept];

    pub fn is_accept(self) -> bool {
        matches!(self, SwipeDirection::Accept | SwipeDirection::StrongAccept)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Reject => "left",
            SwipeDirection::Accept => "right",
            SwipeDirection::StrongAccept => "superlike",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwipeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "reject" => Ok(SwipeDirection::Reject),
            "right" | "accept" => Ok(SwipeDirection::Accept),
            "superlike" | "strong_accept" => Ok(SwipeDirection::StrongAccept),
            other => Err(format!("unknown swipe direction '{}'", other)),
        }
    }
}

/// A persisted swipe row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub id: Uuid,
    pub swiper_id: Uuid,
    pub swiped_id: Uuid,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}

/// A swipe about to be inserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSwipe {
    pub swiper_id: Uuid,
    pub swiped_id: Uuid,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}

/// Unordered pair of members, kept in canonical (sorted) order.
///
/// Matches are always stored with `user1_id = low` and `user2_id = high`,
/// so the same pair maps to the same row no matter who swiped last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    low: Uuid,
    high: Uuid,
}

impl PairKey {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> Uuid {
        self.low
    }

    pub fn high(&self) -> Uuid {
        self.high
    }

    pub fn contains(&self, user_id: Uuid) -> bool {
        self.low == user_id || self.high == user_id
    }

    /// The other member of the pair, if `user_id` belongs to it
    pub fn other(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.low {
            Some(self.high)
        } else if user_id == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Matched,
    Pending,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::Pending => "pending",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matched" => Ok(MatchStatus::Matched),
            "pending" => Ok(MatchStatus::Pending),
            other => Err(format!("unknown match status '{}'", other)),
        }
    }
}

/// Confirmed mutual match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub status: MatchStatus,
    pub match_percentage: f64,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn pair(&self) -> PairKey {
        PairKey::new(self.user1_id, self.user2_id)
    }
}

/// A match about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub pair: PairKey,
    pub status: MatchStatus,
    pub match_percentage: f64,
    pub created_at: DateTime<Utc>,
}

/// Weights for tag-overlap match scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub interests: f64,
    pub looking_for: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.30,
            interests: 0.40,
            looking_for: 0.30,
        }
    }
}
