//! Feed configuration structures

use serde::{Deserialize, Serialize};

use crate::feed::{FeedTab, SortMode};

/// How the `recent` sort orders items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecentOrder {
    /// Keep the source order, which the bundled data already treats as newest-first
    #[default]
    Source,
    /// Stable sort by `createdAt`, newest first
    CreatedAtDesc,
}

/// Feed configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub default_tab: FeedTab,
    pub default_sort: SortMode,
    pub recent_order: RecentOrder,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_tab: FeedTab::Visualizations,
            default_sort: SortMode::Recent,
            recent_order: RecentOrder::Source,
        }
    }
}
