//! Property tests for feed derivation
//!
//! Property 1: Filter soundness
//! Property 2: Ordering by sort key
//! Property 3: Stability on equal keys
//! Property 4: Reset restores the default collection
//! Property 5: Output is drawn from the input

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashMap;

use crate::config::RecentOrder;
use crate::feed::{derive_items, FeedItem, FeedTab, SelectionState, SortMode};
use crate::model::{Category, Challenge, ChallengeStatus, Difficulty, Tier, User, Visualization};

// ═══════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════

fn author() -> User {
    User {
        id: "u0".to_string(),
        username: "prop_author".to_string(),
        avatar: "PA".to_string(),
        tier: Tier::Operator,
        rep: 700,
    }
}

fn timestamp(offset_hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(offset_hours)
}

fn make_challenge(
    index: usize,
    category: Category,
    difficulty: Difficulty,
    top_score: u8,
    view_count: u32,
    age_hours: i64,
) -> Challenge {
    Challenge {
        id: format!("c{index}"),
        title: format!("Challenge {index}"),
        description: String::new(),
        category,
        difficulty,
        author: author(),
        created_at: timestamp(age_hours),
        ends_at: timestamp(age_hours + 720),
        submission_count: 0,
        view_count,
        top_score,
        prize: None,
        tags: Vec::new(),
        status: ChallengeStatus::Open,
    }
}

fn make_visualization(index: usize, challenge: Challenge, score: Option<u8>, likes: u32) -> Visualization {
    Visualization {
        id: format!("v{index}"),
        challenge_id: challenge.id.clone(),
        created_at: challenge.created_at,
        challenge,
        author: author(),
        title: format!("Visualization {index}"),
        description: String::new(),
        image_url: String::new(),
        score,
        rank: None,
        ai_verdict: None,
        likes,
        saves: 0,
        views: 0,
        tags: Vec::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators
// ═══════════════════════════════════════════════════════════════════════════

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

fn sort_strategy() -> impl Strategy<Value = SortMode> {
    prop::sample::select(SortMode::ALL.to_vec())
}

/// Challenges with deliberately narrow key ranges so ties are common
fn challenges_strategy() -> impl Strategy<Value = Vec<Challenge>> {
    prop::collection::vec(
        (
            category_strategy(),
            difficulty_strategy(),
            0..=10u8,
            0..=5u32,
            0..=48i64,
        ),
        0..=30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (category, difficulty, score, views, age))| {
                make_challenge(i, category, difficulty, score * 10, views * 100, age)
            })
            .collect()
    })
}

fn visualizations_strategy() -> impl Strategy<Value = Vec<Visualization>> {
    prop::collection::vec(
        (
            category_strategy(),
            difficulty_strategy(),
            prop::option::of(0..=4u8),
            0..=4u32,
        ),
        0..=30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (category, difficulty, score, likes))| {
                let challenge = make_challenge(i, category, difficulty, 0, 0, 0);
                make_visualization(i, challenge, score.map(|s| s * 25), likes * 10)
            })
            .collect()
    })
}

/// Selection with distinct filter members
fn selection_strategy() -> impl Strategy<Value = SelectionState> {
    (
        prop::sample::subsequence(Category::ALL.to_vec(), 0..=8),
        prop::sample::subsequence(Difficulty::ALL.to_vec(), 0..=4),
        sort_strategy(),
    )
        .prop_map(|(categories, difficulties, sort)| {
            let mut selection = SelectionState::new(FeedTab::Challenges, sort);
            for category in categories {
                selection.toggle_category(category);
            }
            for difficulty in difficulties {
                selection.toggle_difficulty(difficulty);
            }
            selection
        })
}

fn input_positions<T: FeedItem>(items: &[T]) -> HashMap<&str, usize> {
    items.iter().enumerate().map(|(i, item)| (item.id(), i)).collect()
}

fn sort_key<T: FeedItem>(item: &T, sort: SortMode) -> u32 {
    match sort {
        SortMode::Recent => 0,
        SortMode::Top => item.top_key(),
        SortMode::Trending => item.trending_key(),
    }
}

fn check_ordering<T: FeedItem>(input: &[T], derived: &[&T], sort: SortMode) -> Result<(), TestCaseError> {
    let positions = input_positions(input);
    for pair in derived.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (ka, kb) = (sort_key(a, sort), sort_key(b, sort));
        prop_assert!(ka >= kb, "{} ({}) before {} ({})", a.id(), ka, b.id(), kb);
        if ka == kb {
            prop_assert!(
                positions[a.id()] < positions[b.id()],
                "equal keys reordered: {} and {}",
                a.id(),
                b.id()
            );
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property 1: every derived item passes the active filters, and every
    /// input item passing them is kept
    #[test]
    fn prop_filter_soundness(
        challenges in challenges_strategy(),
        selection in selection_strategy()
    ) {
        let derived = derive_items(&challenges, &selection, RecentOrder::Source);
        for item in &derived {
            prop_assert!(selection.matches(item.category, item.difficulty));
        }
        let expected = challenges
            .iter()
            .filter(|c| selection.matches(c.category, c.difficulty))
            .count();
        prop_assert_eq!(derived.len(), expected);
    }

    /// Property 2 + 3: challenges are non-increasing in key and stable on ties
    #[test]
    fn prop_challenge_ordering(
        challenges in challenges_strategy(),
        selection in selection_strategy()
    ) {
        let derived = derive_items(&challenges, &selection, RecentOrder::Source);
        check_ordering(&challenges, &derived, selection.sort)?;
    }

    /// Property 2 + 3 for visualizations, where a missing score counts as 0
    #[test]
    fn prop_visualization_ordering(
        visualizations in visualizations_strategy(),
        selection in selection_strategy()
    ) {
        let derived = derive_items(&visualizations, &selection, RecentOrder::Source);
        check_ordering(&visualizations, &derived, selection.sort)?;
    }

    /// Property 3: `recent` by timestamp is newest first and stable on equal timestamps
    #[test]
    fn prop_recent_by_created_at(challenges in challenges_strategy()) {
        let selection = SelectionState::new(FeedTab::Challenges, SortMode::Recent);
        let derived = derive_items(&challenges, &selection, RecentOrder::CreatedAtDesc);
        let positions = input_positions(&challenges);
        for pair in derived.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
            if pair[0].created_at == pair[1].created_at {
                prop_assert!(positions[pair[0].id.as_str()] < positions[pair[1].id.as_str()]);
            }
        }
    }

    /// Property 4: resetting filters and returning to `recent` yields the input unchanged
    #[test]
    fn prop_reset_restores_input(
        challenges in challenges_strategy(),
        mut selection in selection_strategy()
    ) {
        selection.reset_filters();
        selection.set_sort(SortMode::Recent);
        let derived = derive_items(&challenges, &selection, RecentOrder::Source);
        let derived_ids: Vec<&str> = derived.iter().map(|c| c.id.as_str()).collect();
        let input_ids: Vec<&str> = challenges.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(derived_ids, input_ids);
    }

    /// Property 5: no item appears twice and nothing outside the input appears
    #[test]
    fn prop_output_drawn_from_input(
        visualizations in visualizations_strategy(),
        selection in selection_strategy()
    ) {
        let derived = derive_items(&visualizations, &selection, RecentOrder::Source);
        let positions = input_positions(&visualizations);
        let mut seen = std::collections::HashSet::new();
        for item in &derived {
            prop_assert!(positions.contains_key(item.id.as_str()));
            prop_assert!(seen.insert(item.id.as_str()));
        }
    }

    /// Toggling the same category twice leaves the selection unchanged
    #[test]
    fn prop_double_toggle_is_identity(
        selection in selection_strategy(),
        category in category_strategy(),
        difficulty in difficulty_strategy()
    ) {
        let mut toggled = selection.clone();
        toggled.toggle_category(category);
        toggled.toggle_category(category);
        toggled.toggle_difficulty(difficulty);
        toggled.toggle_difficulty(difficulty);
        prop_assert_eq!(toggled.active_filter_count(), selection.active_filter_count());
        for c in Category::ALL {
            for d in Difficulty::ALL {
                prop_assert_eq!(toggled.matches(c, d), selection.matches(c, d));
            }
        }
    }
}
