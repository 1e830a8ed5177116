//! Submitted visualization structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use super::{Category, Challenge, Difficulty, User};

/// A user-submitted artifact answering a challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visualization {
    pub id: String,
    pub challenge_id: String,
    pub challenge: Challenge,
    pub author: User,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// AI score, 0..=100, absent until judged
    pub score: Option<u8>,
    pub rank: Option<NonZeroU32>,
    pub ai_verdict: Option<String>,
    pub likes: u32,
    pub saves: u32,
    pub views: u32,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Visualization {
    #[inline]
    pub fn category(&self) -> Category {
        self.challenge.category
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.challenge.difficulty
    }

    pub fn is_top_ranked(&self) -> bool {
        self.rank.map(NonZeroU32::get) == Some(1)
    }

    pub fn score_band(&self) -> Option<ScoreBand> {
        self.score.map(ScoreBand::from_score)
    }
}

/// Badge band for a visualization score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Strong,
    Fair,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            75..=89 => ScoreBand::Strong,
            _ => ScoreBand::Fair,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "#10b981",
            ScoreBand::Strong => "#00d4ff",
            ScoreBand::Fair => "#f59e0b",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::from_score(97), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(90), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(89), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(75), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(74), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Fair);
    }
}
