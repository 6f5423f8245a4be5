// Criterion benchmarks for DevMatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use devmatch::core::{filter_unswiped, MatchScorer, TagOverlapScorer};
use devmatch::models::{Profile, Swipe, SwipeDirection};
use chrono::Utc;
use uuid::Uuid;

const SKILLS: [&str; 8] = ["rust", "go", "python", "sql", "react", "design", "ml", "devops"];
const INTERESTS: [&str; 6] = ["fintech", "ai", "climate", "health", "games", "open source"];

fn create_candidate(i: usize) -> Profile {
    let mut profile = Profile::empty(Uuid::new_v4());
    profile.name = Some(format!("Member {}", i));
    profile.skills = (0..3).map(|k| SKILLS[(i + k) % SKILLS.len()].to_string()).collect();
    profile.interests = (0..2).map(|k| INTERESTS[(i + k) % INTERESTS.len()].to_string()).collect();
    profile.looking_for = vec![SKILLS[(i * 3) % SKILLS.len()].to_string(), "same_country".to_string()];
    profile
}

fn bench_feed_filter(c: &mut Criterion) {
    let user_id = Uuid::new_v4();
    let mut group = c.benchmark_group("feed");

    for candidate_count in [100, 1000, 10000].iter() {
        let candidates: Vec<Profile> = (0..*candidate_count).map(create_candidate).collect();

        // The user has already swiped on every other candidate
        let swipes: Vec<Swipe> = candidates
            .iter()
            .step_by(2)
            .map(|p| Swipe {
                id: Uuid::new_v4(),
                swiper_id: user_id,
                swiped_id: p.id,
                direction: SwipeDirection::Reject,
                created_at: Utc::now(),
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("filter_unswiped", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    filter_unswiped(
                        black_box(user_id),
                        black_box(candidates.clone()),
                        black_box(&swipes),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = TagOverlapScorer::default();
    let a = create_candidate(1);
    let b = create_candidate(4);

    c.bench_function("tag_overlap_score", |bench| {
        bench.iter(|| scorer.score(black_box(&a), black_box(&b)));
    });
}

criterion_group!(benches, bench_feed_filter, bench_scoring);

criterion_main!(benches);
