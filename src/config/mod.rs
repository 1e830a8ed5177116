//! Configuration module
//!
//! Every section is defaulted, so an empty JSON object yields the stock
//! behaviour: 1.5 s simulated auth calls, 5 MB KYC uploads, a 60 s OTP resend
//! cooldown and the feed opened on visualizations sorted by `recent`.

mod auth;
mod feed;

pub use auth::*;
pub use feed::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub feed: FeedConfig,
    pub auth: AuthConfig,
}

impl VaultConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}
