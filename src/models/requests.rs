use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to record a swipe on another member
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[serde(alias = "target_id", rename = "targetId")]
    pub target_id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub direction: String,
}

/// Basic information step of the onboarding wizard
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BasicInfo {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[validate(range(min = 16, max = 120))]
    #[serde(default)]
    pub age: Option<i16>,
    #[serde(default)]
    pub country: Option<String>,
    #[validate(length(max = 12))]
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Everything collected by the onboarding wizard, submitted on its last step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OnboardingDraft {
    #[validate(nested)]
    #[serde(alias = "basic_info", rename = "basicInfo")]
    pub basic_info: BasicInfo,
    #[validate(length(max = 10))]
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[validate(length(max = 30))]
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(length(max = 30))]
    #[serde(default)]
    pub interests: Vec<String>,
    #[validate(length(max = 30))]
    #[serde(default, alias = "looking_for", rename = "lookingFor")]
    pub looking_for: Vec<String>,
    #[validate(length(max = 30))]
    #[serde(default, alias = "skills_looking_for", rename = "skillsLookingFor")]
    pub skills_looking_for: Vec<String>,
    #[validate(length(max = 30))]
    #[serde(default, alias = "languages_looking_for", rename = "languagesLookingFor")]
    pub languages_looking_for: Vec<String>,
    #[validate(length(max = 30))]
    #[serde(default, alias = "countries_looking_for", rename = "countriesLookingFor")]
    pub countries_looking_for: Vec<String>,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub bio: Option<String>,
    #[validate(length(max = 6))]
    #[serde(default, alias = "photo_urls", rename = "photoUrls")]
    pub photo_urls: Vec<String>,
    #[validate(url)]
    #[serde(default, alias = "linkedin_url", rename = "linkedinUrl")]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    #[serde(default, alias = "github_url", rename = "githubUrl")]
    pub github_url: Option<String>,
    #[validate(url)]
    #[serde(default, alias = "twitter_url", rename = "twitterUrl")]
    pub twitter_url: Option<String>,
    #[validate(url)]
    #[serde(default, alias = "website_url", rename = "websiteUrl")]
    pub website_url: Option<String>,
    #[validate(url)]
    #[serde(default, alias = "instagram_url", rename = "instagramUrl")]
    pub instagram_url: Option<String>,
    #[validate(url)]
    #[serde(default, alias = "tiktok_url", rename = "tiktokUrl")]
    pub tiktok_url: Option<String>,
    #[validate(url)]
    #[serde(default, alias = "youtube_url", rename = "youtubeUrl")]
    pub youtube_url: Option<String>,
    #[validate(url)]
    #[serde(default, alias = "other_url", rename = "otherUrl")]
    pub other_url: Option<String>,
}
