//! Feed selection state: active tab, sort mode and filter sets

use serde::{Deserialize, Serialize};
use smallvec::{Array, SmallVec};
use std::fmt;
use std::str::FromStr;

use crate::error::VaultError;
use crate::model::{Category, Difficulty};

/// Which collection the feed is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedTab {
    #[default]
    Visualizations,
    Challenges,
}

impl FeedTab {
    pub fn label(self) -> &'static str {
        match self {
            FeedTab::Visualizations => "visualizations",
            FeedTab::Challenges => "challenges",
        }
    }
}

impl fmt::Display for FeedTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeedTab {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visualizations" | "viz" => Ok(FeedTab::Visualizations),
            "challenges" => Ok(FeedTab::Challenges),
            _ => Err(VaultError::UnknownTab(s.to_string())),
        }
    }
}

/// Feed ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Recent,
    Top,
    Trending,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Recent, SortMode::Top, SortMode::Trending];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Top => "top",
            SortMode::Trending => "trending",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortMode {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SortMode::ALL
            .into_iter()
            .find(|m| m.label() == wanted)
            .ok_or_else(|| VaultError::UnknownSort(s.to_string()))
    }
}

pub type CategorySet = SmallVec<[Category; 8]>;
pub type DifficultySet = SmallVec<[Difficulty; 4]>;

/// Flip membership of `value`, keeping insertion order. Returns true if now selected.
fn toggle<A>(set: &mut SmallVec<A>, value: A::Item) -> bool
where
    A: Array,
    A::Item: PartialEq,
{
    if let Some(pos) = set.iter().position(|v| *v == value) {
        set.remove(pos);
        false
    } else {
        set.push(value);
        true
    }
}

/// Wire shape of a stored selection; filter lists may repeat members
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StoredSelection {
    active_tab: FeedTab,
    sort: SortMode,
    categories: Vec<Category>,
    difficulties: Vec<Difficulty>,
}

impl From<StoredSelection> for SelectionState {
    fn from(stored: StoredSelection) -> Self {
        let mut state = SelectionState::new(stored.active_tab, stored.sort);
        for category in stored.categories {
            if !state.categories.contains(&category) {
                state.categories.push(category);
            }
        }
        for difficulty in stored.difficulties {
            if !state.difficulties.contains(&difficulty) {
                state.difficulties.push(difficulty);
            }
        }
        state
    }
}

/// Everything the user has picked on the feed screen
///
/// Empty filter sets mean "no filter". All operations are plain state
/// replacement and cannot fail. Deserializing drops repeated filter members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredSelection")]
pub struct SelectionState {
    pub active_tab: FeedTab,
    pub sort: SortMode,
    categories: CategorySet,
    difficulties: DifficultySet,
}

impl SelectionState {
    pub fn new(active_tab: FeedTab, sort: SortMode) -> Self {
        Self {
            active_tab,
            sort,
            ..Default::default()
        }
    }

    pub fn set_tab(&mut self, tab: FeedTab) {
        self.active_tab = tab;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn toggle_category(&mut self, category: Category) -> bool {
        toggle(&mut self.categories, category)
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) -> bool {
        toggle(&mut self.difficulties, difficulty)
    }

    /// Clear both filter sets; tab and sort are kept
    pub fn reset_filters(&mut self) {
        self.categories.clear();
        self.difficulties.clear();
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn difficulties(&self) -> &[Difficulty] {
        &self.difficulties
    }

    pub fn active_filter_count(&self) -> usize {
        self.categories.len() + self.difficulties.len()
    }

    #[inline]
    pub fn matches(&self, category: Category, difficulty: Difficulty) -> bool {
        (self.categories.is_empty() || self.categories.contains(&category))
            && (self.difficulties.is_empty() || self.difficulties.contains(&difficulty))
    }
}
