//! Benchmark for feed derivation
//!
//! Filters and sorts synthetic collections far larger than the bundled data.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vector_vault_core::config::RecentOrder;
use vector_vault_core::feed::{derive_items, FeedTab, SelectionState, SortMode};
use vector_vault_core::model::{
    Category, Challenge, ChallengeStatus, Difficulty, Tier, User, Visualization,
};

fn author() -> User {
    User {
        id: "u0".to_string(),
        username: "bench".to_string(),
        avatar: "BE".to_string(),
        tier: Tier::Analyst,
        rep: 100,
    }
}

/// Deterministic spread over every category, difficulty and score
fn create_challenges(count: usize) -> Vec<Challenge> {
    let epoch = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| Challenge {
            id: format!("c{i}"),
            title: format!("Challenge {i}"),
            description: String::new(),
            category: Category::ALL[i % Category::ALL.len()],
            difficulty: Difficulty::ALL[(i / 3) % Difficulty::ALL.len()],
            author: author(),
            created_at: epoch + Duration::minutes(((i * 7919) % count) as i64),
            ends_at: epoch + Duration::days(30),
            submission_count: (i % 50) as u32,
            view_count: ((i * 31) % 5000) as u32,
            top_score: ((i * 17) % 101) as u8,
            prize: None,
            tags: Vec::new(),
            status: ChallengeStatus::Open,
        })
        .collect()
}

fn create_visualizations(challenges: &[Challenge]) -> Vec<Visualization> {
    challenges
        .iter()
        .enumerate()
        .map(|(i, challenge)| Visualization {
            id: format!("v{i}"),
            challenge_id: challenge.id.clone(),
            challenge: challenge.clone(),
            author: author(),
            title: format!("Visualization {i}"),
            description: String::new(),
            image_url: String::new(),
            score: (i % 4 != 0).then_some(((i * 13) % 101) as u8),
            rank: None,
            ai_verdict: None,
            likes: ((i * 37) % 900) as u32,
            saves: 0,
            views: 0,
            created_at: challenge.created_at,
            tags: Vec::new(),
        })
        .collect()
}

fn benchmark_sort_modes(c: &mut Criterion) {
    let challenges = create_challenges(10_000);
    let visualizations = create_visualizations(&challenges);

    let mut group = c.benchmark_group("derive_visualizations");
    for sort in [SortMode::Recent, SortMode::Top, SortMode::Trending] {
        let selection = SelectionState::new(FeedTab::Visualizations, sort);
        group.bench_with_input(BenchmarkId::from_parameter(sort), &selection, |b, selection| {
            b.iter(|| {
                let derived = derive_items(
                    black_box(&visualizations),
                    black_box(selection),
                    RecentOrder::CreatedAtDesc,
                );
                black_box(derived.len())
            })
        });
    }
    group.finish();
}

fn benchmark_filtered(c: &mut Criterion) {
    let challenges = create_challenges(10_000);
    let mut selection = SelectionState::new(FeedTab::Challenges, SortMode::Trending);
    selection.toggle_category(Category::MalwareAnalysis);
    selection.toggle_category(Category::NetworkSecurity);
    selection.toggle_difficulty(Difficulty::Expert);

    c.bench_function("derive_challenges_filtered", |b| {
        b.iter(|| {
            let derived = derive_items(
                black_box(&challenges),
                black_box(&selection),
                RecentOrder::Source,
            );
            black_box(derived.len())
        })
    });
}

criterion_group!(benches, benchmark_sort_modes, benchmark_filtered);
criterion_main!(benches);
