//! Feed derivation: filter a collection by the selection and order it

use chrono::{DateTime, Utc};
use std::cmp::Reverse;

use super::{SelectionState, SortMode};
use crate::config::RecentOrder;
use crate::model::{Category, Challenge, Difficulty, Visualization};

/// Anything the feed can list
pub trait FeedItem {
    fn id(&self) -> &str;
    fn category(&self) -> Category;
    fn difficulty(&self) -> Difficulty;
    /// Key for `top`: score, with an unscored item counting as 0
    fn top_key(&self) -> u32;
    /// Key for `trending`
    fn trending_key(&self) -> u32;
    fn created_at(&self) -> DateTime<Utc>;
}

impl FeedItem for Challenge {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Category {
        self.category
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn top_key(&self) -> u32 {
        self.top_score as u32
    }

    fn trending_key(&self) -> u32 {
        self.view_count
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl FeedItem for Visualization {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Category {
        self.challenge.category
    }

    fn difficulty(&self) -> Difficulty {
        self.challenge.difficulty
    }

    fn top_key(&self) -> u32 {
        self.score.unwrap_or(0) as u32
    }

    fn trending_key(&self) -> u32 {
        self.likes
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Derive the displayed sequence from `items` and `selection`
///
/// Filtering keeps input order; every ordering below is a stable sort, so
/// items with equal keys stay in input order.
pub fn derive_items<'a, T: FeedItem>(
    items: &'a [T],
    selection: &SelectionState,
    recent: RecentOrder,
) -> Vec<&'a T> {
    let mut derived: Vec<&T> = items
        .iter()
        .filter(|item| selection.matches(item.category(), item.difficulty()))
        .collect();

    match selection.sort {
        SortMode::Recent => {
            if recent == RecentOrder::CreatedAtDesc {
                derived.sort_by_key(|item| Reverse(item.created_at()));
            }
        }
        SortMode::Top => derived.sort_by_key(|item| Reverse(item.top_key())),
        SortMode::Trending => derived.sort_by_key(|item| Reverse(item.trending_key())),
    }

    derived
}
