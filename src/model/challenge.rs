//! Challenge structures and their classification enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::User;
use crate::error::VaultError;

/// Lowercase and fold `-`/`_` to spaces so "malware-analysis" matches "Malware Analysis"
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Challenge category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Network Security")]
    NetworkSecurity,
    #[serde(rename = "Web Security")]
    WebSecurity,
    #[serde(rename = "Malware Analysis")]
    MalwareAnalysis,
    #[serde(rename = "Cryptography")]
    Cryptography,
    #[serde(rename = "Forensics")]
    Forensics,
    #[serde(rename = "Cloud Security")]
    CloudSecurity,
    #[serde(rename = "Reverse Engineering")]
    ReverseEngineering,
    #[serde(rename = "Penetration Testing")]
    PenetrationTesting,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::NetworkSecurity,
        Category::WebSecurity,
        Category::MalwareAnalysis,
        Category::Cryptography,
        Category::Forensics,
        Category::CloudSecurity,
        Category::ReverseEngineering,
        Category::PenetrationTesting,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::NetworkSecurity => "Network Security",
            Category::WebSecurity => "Web Security",
            Category::MalwareAnalysis => "Malware Analysis",
            Category::Cryptography => "Cryptography",
            Category::Forensics => "Forensics",
            Category::CloudSecurity => "Cloud Security",
            Category::ReverseEngineering => "Reverse Engineering",
            Category::PenetrationTesting => "Penetration Testing",
        }
    }

    pub fn icon(self) -> char {
        match self {
            Category::NetworkSecurity => '◈',
            Category::WebSecurity => '⬡',
            Category::MalwareAnalysis => '◆',
            Category::Cryptography => '▲',
            Category::Forensics => '◉',
            Category::CloudSecurity => '⬢',
            Category::ReverseEngineering => '◇',
            Category::PenetrationTesting => '▸',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| VaultError::UnknownCategory(s.to_string()))
    }
}

/// Challenge difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Difficulty::Beginner => "#10b981",
            Difficulty::Intermediate => "#00d4ff",
            Difficulty::Advanced => "#f59e0b",
            Difficulty::Expert => "#ef4444",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| VaultError::UnknownDifficulty(s.to_string()))
    }
}

/// Lifecycle state of a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Open,
    Closed,
    Judging,
}

impl ChallengeStatus {
    pub fn label(self) -> &'static str {
        match self {
            ChallengeStatus::Open => "open",
            ChallengeStatus::Closed => "closed",
            ChallengeStatus::Judging => "judging",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ChallengeStatus::Open => "#10b981",
            ChallengeStatus::Judging => "#f59e0b",
            ChallengeStatus::Closed => "#475569",
        }
    }
}

/// A posted visualization task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub author: User,
    pub created_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub submission_count: u32,
    pub view_count: u32,
    /// Best submission score so far, 0..=100
    pub top_score: u8,
    pub prize: Option<u32>,
    pub tags: Vec<String>,
    pub status: ChallengeStatus,
}
