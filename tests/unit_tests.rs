// Unit tests for DevMatch

use devmatch::core::{
    assemble_profile, filter_unswiped, needs_onboarding, parse_direction,
    scoring::jaccard, MatchScorer, Session, TagOverlapScorer,
};
use devmatch::error::MatchError;
use devmatch::models::{
    BasicInfo, OnboardingDraft, PairKey, Profile, ScoringWeights, Swipe, SwipeDirection,
};
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

fn create_test_profile(skills: &[&str], interests: &[&str], looking_for: &[&str]) -> Profile {
    let mut profile = Profile::empty(Uuid::new_v4());
    profile.name = Some("Test User".to_string());
    profile.skills = skills.iter().map(|s| s.to_string()).collect();
    profile.interests = interests.iter().map(|s| s.to_string()).collect();
    profile.looking_for = looking_for.iter().map(|s| s.to_string()).collect();
    profile
}

fn swipe(swiper: Uuid, swiped: Uuid, direction: SwipeDirection) -> Swipe {
    Swipe {
        id: Uuid::new_v4(),
        swiper_id: swiper,
        swiped_id: swiped,
        direction,
        created_at: Utc::now(),
    }
}

#[test]
fn test_pair_key_is_order_independent() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let forward = PairKey::new(a, b);
    let backward = PairKey::new(b, a);

    assert_eq!(forward, backward);
    assert!(forward.low() < forward.high());
    assert_eq!(forward.other(a), Some(b));
    assert_eq!(forward.other(b), Some(a));
    assert_eq!(forward.other(Uuid::new_v4()), None);
}

#[test]
fn test_direction_wire_names() {
    assert_eq!(parse_direction("left").unwrap(), SwipeDirection::Reject);
    assert_eq!(parse_direction("right").unwrap(), SwipeDirection::Accept);
    assert_eq!(parse_direction("superlike").unwrap(), SwipeDirection::StrongAccept);

    assert!(SwipeDirection::Accept.is_accept());
    assert!(SwipeDirection::StrongAccept.is_accept());
    assert!(!SwipeDirection::Reject.is_accept());

    let json = serde_json::to_string(&SwipeDirection::StrongAccept).unwrap();
    assert_eq!(json, "\"superlike\"");
}

#[test]
fn test_unknown_direction_is_invalid_swipe() {
    assert!(matches!(parse_direction("up"), Err(MatchError::InvalidSwipe(_))));
    assert!(matches!(parse_direction(""), Err(MatchError::InvalidSwipe(_))));
}

#[test]
fn test_anonymous_session_is_unauthenticated() {
    assert!(matches!(Session::anonymous().require(), Err(MatchError::Unauthenticated)));

    let user_id = Uuid::new_v4();
    assert_eq!(Session::authenticated(user_id).require().unwrap(), user_id);
}

#[test]
fn test_filter_unswiped_drops_self_and_swiped() {
    let me = Uuid::new_v4();
    let mut own = Profile::empty(me);
    own.name = Some("Me".to_string());

    let rejected = create_test_profile(&["rust"], &[], &[]);
    let accepted = create_test_profile(&["go"], &[], &[]);
    let fresh = create_test_profile(&["python"], &[], &[]);

    let swipes = vec![
        swipe(me, rejected.id, SwipeDirection::Reject),
        swipe(me, accepted.id, SwipeDirection::Accept),
    ];

    let feed = filter_unswiped(
        me,
        vec![own, rejected, accepted, fresh.clone()],
        &swipes,
    );

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].id, fresh.id);
}

#[test]
fn test_filter_unswiped_keeps_order() {
    let me = Uuid::new_v4();
    let profiles: Vec<Profile> = (0..5).map(|_| create_test_profile(&[], &[], &[])).collect();
    let ids: Vec<Uuid> = profiles.iter().map(|p| p.id).collect();

    let feed = filter_unswiped(me, profiles, &[]);

    assert_eq!(feed.iter().map(|p| p.id).collect::<Vec<_>>(), ids);
}

#[test]
fn test_jaccard_similarity() {
    let a: HashSet<String> = ["rust", "go"].iter().map(|s| s.to_string()).collect();
    let b: HashSet<String> = ["go", "python"].iter().map(|s| s.to_string()).collect();

    let similarity = jaccard(&a, &b);
    assert!((similarity - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_score_is_symmetric_and_bounded() {
    let scorer = TagOverlapScorer::default();
    let a = create_test_profile(&["rust", "sql"], &["fintech"], &["design"]);
    let b = create_test_profile(&["design", "rust"], &["fintech", "ai"], &["sql"]);

    let ab = scorer.score(&a, &b);
    let ba = scorer.score(&b, &a);

    assert_eq!(ab, ba);
    assert!((0.0..=100.0).contains(&ab));
    assert_eq!(ab, ab.round());
}

#[test]
fn test_score_ignores_preference_flags() {
    let scorer = TagOverlapScorer::default();
    let a = create_test_profile(&["rust"], &[], &["same_country"]);
    let b = create_test_profile(&["haskell"], &[], &["same_country"]);

    assert_eq!(scorer.score(&a, &b), 0.0);
}

#[test]
fn test_score_with_zero_weights() {
    let scorer = TagOverlapScorer::new(ScoringWeights {
        skills: 0.0,
        interests: 0.0,
        looking_for: 0.0,
    });
    let a = create_test_profile(&["rust"], &["ai"], &[]);

    assert_eq!(scorer.score(&a, &a), 0.0);
}

#[test]
fn test_needs_onboarding_rules() {
    assert!(needs_onboarding(None));

    let mut profile = Profile::empty(Uuid::new_v4());
    assert!(needs_onboarding(Some(&profile)));

    profile.name = Some("Ada".to_string());
    profile.roles = vec!["engineer".to_string()];
    profile.skills = vec!["rust".to_string()];
    assert!(needs_onboarding(Some(&profile)));

    profile.interests = vec!["compilers".to_string()];
    assert!(!needs_onboarding(Some(&profile)));
}

#[test]
fn test_assemble_profile_keeps_known_preference_flags() {
    let draft = OnboardingDraft {
        basic_info: BasicInfo {
            name: "  Ada Lovelace ".to_string(),
            ..BasicInfo::default()
        },
        roles: vec!["founder".to_string()],
        skills: vec!["Rust".to_string(), "rust".to_string(), " ".to_string()],
        interests: vec!["ai".to_string()],
        looking_for: vec![
            "cofounder".to_string(),
            "same_country".to_string(),
            "same_planet".to_string(),
        ],
        ..OnboardingDraft::default()
    };

    let update = assemble_profile(&draft).unwrap();

    assert_eq!(update.name, "Ada Lovelace");
    assert_eq!(update.skills.len(), 1);
    assert!(update.looking_for.contains(&"cofounder".to_string()));
    assert!(update.looking_for.contains(&"same_country".to_string()));
    assert!(!update.looking_for.contains(&"same_planet".to_string()));
}

#[test]
fn test_assemble_profile_rejects_bad_age() {
    let draft = OnboardingDraft {
        basic_info: BasicInfo {
            name: "Kid".to_string(),
            age: Some(9),
            ..BasicInfo::default()
        },
        ..OnboardingDraft::default()
    };

    assert!(matches!(assemble_profile(&draft), Err(MatchError::InvalidProfile(_))));
}
