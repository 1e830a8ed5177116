//! FeedController - owns the data set and the selection state
//!
//! Renderers get a [`FeedView`] snapshot per frame; the controller is the only
//! place selection changes happen. Per-card like/save toggles live here too,
//! layered over the immutable fixture counts.

use ahash::AHashMap;
use serde::Serialize;

use super::{derive_items, FeedTab, SelectionState, SortMode};
use crate::config::FeedConfig;
use crate::error::{Result, VaultError};
use crate::model::{Category, Challenge, Difficulty, FixtureSet, Visualization};

/// Session-local engagement with one visualization card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Engagement {
    pub liked: bool,
    pub saved: bool,
}

/// Counts as displayed on a card, including the session's own toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardStats {
    pub likes: u32,
    pub saves: u32,
    pub liked: bool,
    pub saved: bool,
}

/// Derived items for the active tab
#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum FeedItems<'a> {
    Visualizations(Vec<&'a Visualization>),
    Challenges(Vec<&'a Challenge>),
}

impl FeedItems<'_> {
    pub fn len(&self) -> usize {
        match self {
            FeedItems::Visualizations(items) => items.len(),
            FeedItems::Challenges(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            FeedItems::Visualizations(items) => items.iter().map(|v| v.id.as_str()).collect(),
            FeedItems::Challenges(items) => items.iter().map(|c| c.id.as_str()).collect(),
        }
    }
}

/// Snapshot handed to a renderer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView<'a> {
    pub tab: FeedTab,
    pub sort: SortMode,
    pub active_filters: usize,
    pub item_count: usize,
    pub items: FeedItems<'a>,
}

/// Feed view-state controller
pub struct FeedController {
    fixtures: FixtureSet,
    config: FeedConfig,
    selection: SelectionState,
    engagement: AHashMap<String, Engagement>,
}

impl FeedController {
    pub fn new(fixtures: FixtureSet, config: FeedConfig) -> Self {
        let selection = SelectionState::new(config.default_tab, config.default_sort);
        Self {
            fixtures,
            config,
            selection,
            engagement: AHashMap::new(),
        }
    }

    /// Controller over the bundled sample data with default settings
    pub fn with_sample_data() -> Result<Self> {
        Ok(Self::new(FixtureSet::builtin()?, FeedConfig::default()))
    }

    pub fn fixtures(&self) -> &FixtureSet {
        &self.fixtures
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Replace the whole selection, e.g. one restored from storage
    pub fn restore_selection(&mut self, selection: SelectionState) {
        tracing::debug!(?selection, "selection restored");
        self.selection = selection;
    }

    pub fn set_tab(&mut self, tab: FeedTab) {
        tracing::debug!(%tab, "tab changed");
        self.selection.set_tab(tab);
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        tracing::debug!(%sort, "sort changed");
        self.selection.set_sort(sort);
    }

    pub fn toggle_category(&mut self, category: Category) -> bool {
        let selected = self.selection.toggle_category(category);
        tracing::debug!(%category, selected, "category toggled");
        selected
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) -> bool {
        let selected = self.selection.toggle_difficulty(difficulty);
        tracing::debug!(%difficulty, selected, "difficulty toggled");
        selected
    }

    pub fn reset_filters(&mut self) {
        tracing::debug!(
            cleared = self.selection.active_filter_count(),
            "filters reset"
        );
        self.selection.reset_filters();
    }

    pub fn visualizations(&self) -> Vec<&Visualization> {
        derive_items(
            &self.fixtures.visualizations,
            &self.selection,
            self.config.recent_order,
        )
    }

    pub fn challenges(&self) -> Vec<&Challenge> {
        derive_items(
            &self.fixtures.challenges,
            &self.selection,
            self.config.recent_order,
        )
    }

    pub fn view(&self) -> FeedView<'_> {
        let items = match self.selection.active_tab {
            FeedTab::Visualizations => FeedItems::Visualizations(self.visualizations()),
            FeedTab::Challenges => FeedItems::Challenges(self.challenges()),
        };
        FeedView {
            tab: self.selection.active_tab,
            sort: self.selection.sort,
            active_filters: self.selection.active_filter_count(),
            item_count: items.len(),
            items,
        }
    }

    pub fn card_stats(&self, visualization_id: &str) -> Result<CardStats> {
        let viz = self
            .fixtures
            .visualization(visualization_id)
            .ok_or_else(|| VaultError::VisualizationNotFound(visualization_id.to_string()))?;
        let engagement = self
            .engagement
            .get(visualization_id)
            .copied()
            .unwrap_or_default();

        Ok(CardStats {
            likes: viz.likes + engagement.liked as u32,
            saves: viz.saves + engagement.saved as u32,
            liked: engagement.liked,
            saved: engagement.saved,
        })
    }

    pub fn toggle_like(&mut self, visualization_id: &str) -> Result<CardStats> {
        self.engagement_mut(visualization_id)?.liked ^= true;
        self.card_stats(visualization_id)
    }

    pub fn toggle_save(&mut self, visualization_id: &str) -> Result<CardStats> {
        self.engagement_mut(visualization_id)?.saved ^= true;
        self.card_stats(visualization_id)
    }

    fn engagement_mut(&mut self, visualization_id: &str) -> Result<&mut Engagement> {
        if self.fixtures.visualization(visualization_id).is_none() {
            return Err(VaultError::VisualizationNotFound(
                visualization_id.to_string(),
            ));
        }
        Ok(self
            .engagement
            .entry(visualization_id.to_string())
            .or_default())
    }
}
