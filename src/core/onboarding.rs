use crate::core::session::Session;
use crate::error::MatchError;
use crate::models::{OnboardingDraft, Profile, ProfileUpdate};
use crate::services::MatchStore;
use std::collections::HashSet;
use validator::Validate;

/// Looking-for entries that express a preference rather than a skill
pub const PREFERENCE_FLAGS: [&str; 2] = ["same_language", "same_country"];

#[inline]
pub fn is_preference_flag(tag: &str) -> bool {
    tag.starts_with("same_")
}

/// A profile needs onboarding until it has a name, a role, a skill and an interest
pub fn needs_onboarding(profile: Option<&Profile>) -> bool {
    match profile {
        None => true,
        Some(p) => {
            let has_name = p.name.as_deref().map(|n| !n.trim().is_empty()).unwrap_or(false);
            !(has_name && !p.roles.is_empty() && !p.skills.is_empty() && !p.interests.is_empty())
        }
    }
}

/// Validate a wizard draft and turn it into the profile fields to store
pub fn assemble_profile(draft: &OnboardingDraft) -> Result<ProfileUpdate, MatchError> {
    draft
        .validate()
        .map_err(|e| MatchError::InvalidProfile(e.to_string()))?;

    let name = draft.basic_info.name.trim().to_string();
    if name.is_empty() {
        return Err(MatchError::InvalidProfile("name must not be blank".to_string()));
    }

    let mut looking_for = clean_list(&draft.looking_for);
    looking_for.retain(|tag| !is_preference_flag(tag) || PREFERENCE_FLAGS.contains(&tag.as_str()));

    Ok(ProfileUpdate {
        email: clean_text(&draft.basic_info.email),
        name,
        age: draft.basic_info.age,
        gender: clean_text(&draft.basic_info.gender),
        country: clean_text(&draft.basic_info.country),
        languages: clean_list(&draft.basic_info.languages),
        roles: clean_list(&draft.roles),
        stage: clean_text(&draft.stage),
        skills: clean_list(&draft.skills),
        interests: clean_list(&draft.interests),
        looking_for,
        skills_looking_for: clean_list(&draft.skills_looking_for),
        languages_looking_for: clean_list(&draft.languages_looking_for),
        countries_looking_for: clean_list(&draft.countries_looking_for),
        bio: clean_text(&draft.bio),
        photo_urls: clean_list(&draft.photo_urls),
        linkedin_url: clean_text(&draft.linkedin_url),
        github_url: clean_text(&draft.github_url),
        twitter_url: clean_text(&draft.twitter_url),
        website_url: clean_text(&draft.website_url),
        instagram_url: clean_text(&draft.instagram_url),
        tiktok_url: clean_text(&draft.tiktok_url),
        youtube_url: clean_text(&draft.youtube_url),
        other_url: clean_text(&draft.other_url),
    })
}

/// Save the draft as the session user's profile
pub async fn complete_onboarding(
    store: &dyn MatchStore,
    session: &Session,
    draft: &OnboardingDraft,
) -> Result<Profile, MatchError> {
    let user_id = session.require()?;
    let update = assemble_profile(draft)?;

    let profile = store.upsert_profile(user_id, &update).await?;
    tracing::info!("Completed onboarding for {}", user_id);

    Ok(profile)
}

/// The session user's profile and whether onboarding is still required
pub async fn own_profile(store: &dyn MatchStore, session: &Session) -> Result<(Option<Profile>, bool), MatchError> {
    let user_id = session.require()?;
    let profile = store.get_profile(user_id).await?;
    let needs = needs_onboarding(profile.as_ref());

    Ok((profile, needs))
}

/// Trim entries, drop blanks and case-insensitive duplicates, keep first-seen order
fn clean_list(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && seen.insert(v.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn clean_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
