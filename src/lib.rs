//! Vector Vault Core - feed view-state and auth flow logic
//!
//! This crate provides the non-presentational core of the Vector Vault
//! platform: the data model and bundled sample data, the feed filter/sort
//! controller, the auth form rules and a typed async client whose default
//! implementation simulates the backend. Python bindings are available
//! behind the `python` feature.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod telemetry;

#[cfg(feature = "python")]
mod python;

pub use crate::config::VaultConfig;
pub use crate::error::{Result, VaultError};
pub use crate::feed::{FeedController, FeedTab, SelectionState, SortMode};
pub use crate::model::{Category, Challenge, Difficulty, FixtureSet, Tier, User, Visualization};
