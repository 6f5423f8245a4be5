use crate::core::onboarding::is_preference_flag;
use crate::models::{Profile, ScoringWeights};
use std::collections::HashSet;

/// Computes the `match_percentage` stored on a new match
pub trait MatchScorer: Send + Sync {
    /// Score in the range 0-100
    fn score(&self, a: &Profile, b: &Profile) -> f64;
}

/// Scores a pair by how much their declared tags overlap.
///
/// score = (
///     jaccard(skills)        * w.skills +
///     jaccard(interests)     * w.interests +
///     complement(looking_for) * w.looking_for
/// ) / sum(w) * 100
///
/// `complement` is the mean of "how much of what A looks for does B have"
/// and the reverse, each as a Jaccard similarity.
#[derive(Debug, Clone)]
pub struct TagOverlapScorer {
    weights: ScoringWeights,
}

impl TagOverlapScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }
}

impl Default for TagOverlapScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl MatchScorer for TagOverlapScorer {
    fn score(&self, a: &Profile, b: &Profile) -> f64 {
        let skills = jaccard(&tags(&a.skills), &tags(&b.skills));
        let interests = jaccard(&tags(&a.interests), &tags(&b.interests));
        let looking_for = (jaccard(&wanted(a), &tags(&b.skills))
            + jaccard(&wanted(b), &tags(&a.skills)))
            / 2.0;

        let w = &self.weights;
        let total_weight = w.skills + w.interests + w.looking_for;
        if total_weight <= 0.0 {
            return 0.0;
        }

        let weighted = skills * w.skills + interests * w.interests + looking_for * w.looking_for;

        (weighted / total_weight * 100.0).round().clamp(0.0, 100.0)
    }
}

/// Skills a member is looking for in a collaborator
fn wanted(profile: &Profile) -> HashSet<String> {
    let mut wanted = tags(&profile.looking_for);
    wanted.extend(tags(&profile.skills_looking_for));
    wanted
}

/// Normalized tag set; preference flags such as `same_country` are not tags
fn tags(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty() && !is_preference_flag(v))
        .collect()
}

/// Jaccard similarity (0-1); two empty sets score 0
#[inline]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(skills: &[&str], interests: &[&str], looking_for: &[&str]) -> Profile {
        let mut p = Profile::empty(Uuid::new_v4());
        p.skills = skills.iter().map(|s| s.to_string()).collect();
        p.interests = interests.iter().map(|s| s.to_string()).collect();
        p.looking_for = looking_for.iter().map(|s| s.to_string()).collect();
        p
    }

    fn set(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["b", "c"])), 1.0 / 3.0);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["x"]), &set(&["x"])), 1.0);
    }

    #[test]
    fn test_identical_profiles_score_high() {
        let scorer = TagOverlapScorer::default();
        let a = profile(&["Rust", "Go"], &["AI"], &["Go"]);
        let b = profile(&["rust", "go "], &["ai"], &["rust"]);

        let score = scorer.score(&a, &b);
        assert!(score > 70.0, "expected a high score, got {}", score);
        assert!(score <= 100.0);
    }

    #[test]
    fn test_disjoint_profiles_score_zero() {
        let scorer = TagOverlapScorer::default();
        let a = profile(&["Rust"], &["AI"], &["Design"]);
        let b = profile(&["Figma"], &["Music"], &["Sales"]);

        assert_eq!(scorer.score(&a, &b), 0.0);
    }

    #[test]
    fn test_score_is_symmetric() {
        let scorer = TagOverlapScorer::default();
        let a = profile(&["Rust", "SQL"], &["Fintech"], &["Design"]);
        let b = profile(&["SQL", "Design"], &["Fintech", "AI"], &["Rust"]);

        assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a));
    }

    #[test]
    fn test_skills_looking_for_counts_as_wanted() {
        let scorer = TagOverlapScorer::default();
        let mut a = profile(&["Rust"], &[], &[]);
        a.skills_looking_for = vec!["Design".to_string()];
        let b = profile(&["design"], &[], &[]);

        assert!(scorer.score(&a, &b) > 0.0);
    }

    #[test]
    fn test_preference_flags_are_ignored() {
        let scorer = TagOverlapScorer::default();
        let a = profile(&[], &[], &["same_country", "same_language"]);
        let b = profile(&[], &[], &["same_country", "same_language"]);

        assert_eq!(scorer.score(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_weights() {
        let scorer = TagOverlapScorer::new(ScoringWeights { skills: 0.0, interests: 0.0, looking_for: 0.0 });
        let a = profile(&["Rust"], &[], &[]);

        assert_eq!(scorer.score(&a, &a.clone()), 0.0);
    }
}
