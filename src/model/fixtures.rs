//! Bundled sample data
//!
//! Records are stored flat in JSON with authors and challenges referenced by
//! id. Loading joins them into the embedded shapes used by the feed and
//! rejects anything that breaks the model invariants.

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::Path;

use super::{Category, Challenge, ChallengeStatus, Difficulty, User, Visualization};
use crate::error::{Result, VaultError};

const SAMPLE_FEED_JSON: &str = include_str!("../../data/sample_feed.json");

const MAX_SCORE: u8 = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureFile {
    users: Vec<User>,
    current_user: User,
    challenges: Vec<ChallengeRecord>,
    visualizations: Vec<VisualizationRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeRecord {
    id: String,
    title: String,
    description: String,
    category: Category,
    difficulty: Difficulty,
    author_id: String,
    created_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    submission_count: u32,
    view_count: u32,
    top_score: u8,
    prize: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
    status: ChallengeStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisualizationRecord {
    id: String,
    challenge_id: String,
    author_id: String,
    title: String,
    description: String,
    #[serde(default)]
    image_url: String,
    score: Option<u8>,
    rank: Option<NonZeroU32>,
    ai_verdict: Option<String>,
    likes: u32,
    saves: u32,
    views: u32,
    created_at: DateTime<Utc>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Resolved, immutable sample data set
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub users: Vec<User>,
    pub current_user: User,
    /// In source order, which is the feed's default order
    pub challenges: Vec<Challenge>,
    pub visualizations: Vec<Visualization>,
}

impl FixtureSet {
    /// Load the data set compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(SAMPLE_FEED_JSON)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: FixtureFile = serde_json::from_str(raw)?;

        let user_index: AHashMap<&str, &User> =
            file.users.iter().map(|u| (u.id.as_str(), u)).collect();

        let challenges = file
            .challenges
            .into_iter()
            .map(|record| resolve_challenge(record, &user_index))
            .collect::<Result<Vec<_>>>()?;

        let challenge_index: AHashMap<&str, &Challenge> =
            challenges.iter().map(|c| (c.id.as_str(), c)).collect();

        let visualizations = file
            .visualizations
            .into_iter()
            .map(|record| resolve_visualization(record, &user_index, &challenge_index))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            users = file.users.len(),
            challenges = challenges.len(),
            visualizations = visualizations.len(),
            "fixtures loaded"
        );

        Ok(Self {
            users: file.users,
            current_user: file.current_user,
            challenges,
            visualizations,
        })
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn visualization(&self, id: &str) -> Option<&Visualization> {
        self.visualizations.iter().find(|v| v.id == id)
    }
}

fn lookup_user(index: &AHashMap<&str, &User>, id: &str) -> Result<User> {
    index
        .get(id)
        .map(|u| (*u).clone())
        .ok_or_else(|| VaultError::UserNotFound(id.to_string()))
}

fn check_score(id: &str, score: u8) -> Result<()> {
    if score > MAX_SCORE {
        return Err(VaultError::ScoreOutOfRange {
            id: id.to_string(),
            score: score as u32,
        });
    }
    Ok(())
}

fn resolve_challenge(record: ChallengeRecord, users: &AHashMap<&str, &User>) -> Result<Challenge> {
    check_score(&record.id, record.top_score)?;
    let author = lookup_user(users, &record.author_id)?;

    Ok(Challenge {
        id: record.id,
        title: record.title,
        description: record.description,
        category: record.category,
        difficulty: record.difficulty,
        author,
        created_at: record.created_at,
        ends_at: record.ends_at,
        submission_count: record.submission_count,
        view_count: record.view_count,
        top_score: record.top_score,
        prize: record.prize,
        tags: record.tags,
        status: record.status,
    })
}

fn resolve_visualization(
    record: VisualizationRecord,
    users: &AHashMap<&str, &User>,
    challenges: &AHashMap<&str, &Challenge>,
) -> Result<Visualization> {
    if let Some(score) = record.score {
        check_score(&record.id, score)?;
    }
    let author = lookup_user(users, &record.author_id)?;
    let challenge = challenges
        .get(record.challenge_id.as_str())
        .map(|c| (*c).clone())
        .ok_or_else(|| VaultError::ChallengeNotFound(record.challenge_id.clone()))?;

    Ok(Visualization {
        id: record.id,
        challenge_id: record.challenge_id,
        challenge,
        author,
        title: record.title,
        description: record.description,
        image_url: record.image_url,
        score: record.score,
        rank: record.rank,
        ai_verdict: record.ai_verdict,
        likes: record.likes,
        saves: record.saves,
        views: record.views,
        created_at: record.created_at,
        tags: record.tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tier;

    #[test]
    fn test_builtin_counts() {
        let fixtures = FixtureSet::builtin().unwrap();
        assert_eq!(fixtures.users.len(), 8);
        assert_eq!(fixtures.challenges.len(), 6);
        assert_eq!(fixtures.visualizations.len(), 6);
        assert_eq!(fixtures.current_user.username, "you_operator");
        assert_eq!(fixtures.current_user.tier, Tier::Operator);
    }

    #[test]
    fn test_builtin_keeps_source_order() {
        let fixtures = FixtureSet::builtin().unwrap();
        let ids: Vec<&str> = fixtures.challenges.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2", "c3", "c4", "c5", "c6"]);
    }

    #[test]
    fn test_visualizations_embed_their_challenge() {
        let fixtures = FixtureSet::builtin().unwrap();
        for viz in &fixtures.visualizations {
            assert_eq!(viz.challenge.id, viz.challenge_id);
        }
        let v3 = fixtures.visualization("v3").unwrap();
        assert_eq!(v3.author.username, "nx_0x1337");
        assert_eq!(v3.category(), Category::MalwareAnalysis);
        assert!(v3.is_top_ranked());
    }

    #[test]
    fn test_builtin_invariants() {
        let fixtures = FixtureSet::builtin().unwrap();
        for c in &fixtures.challenges {
            assert!(c.top_score <= MAX_SCORE);
        }
        for v in &fixtures.visualizations {
            if let Some(score) = v.score {
                assert!(score <= MAX_SCORE);
            }
            if let Some(rank) = v.rank {
                assert!(rank.get() >= 1);
            }
        }
    }

    fn minimal_file(challenge_author: &str, viz_challenge: &str, score: u32, rank: u32) -> String {
        format!(
            r#"{{
                "users": [{{ "id": "u1", "username": "a", "avatar": "AA", "tier": 1, "rep": 0 }}],
                "currentUser": {{ "id": "me", "username": "me", "avatar": "ME", "tier": 1, "rep": 0 }},
                "challenges": [{{
                    "id": "c1", "title": "t", "description": "d",
                    "category": "Forensics", "difficulty": "Beginner",
                    "authorId": "{challenge_author}",
                    "createdAt": "2025-01-01T00:00:00Z", "endsAt": "2025-02-01T00:00:00Z",
                    "submissionCount": 0, "viewCount": 0, "topScore": 50,
                    "prize": null, "tags": [], "status": "open"
                }}],
                "visualizations": [{{
                    "id": "v1", "challengeId": "{viz_challenge}", "authorId": "u1",
                    "title": "t", "description": "d", "score": {score}, "rank": {rank},
                    "aiVerdict": null, "likes": 0, "saves": 0, "views": 0,
                    "createdAt": "2025-01-02T00:00:00Z", "tags": []
                }}]
            }}"#
        )
    }

    #[test]
    fn test_minimal_file_loads() {
        let fixtures = FixtureSet::from_json_str(&minimal_file("u1", "c1", 40, 1)).unwrap();
        assert_eq!(fixtures.visualizations[0].score, Some(40));
    }

    #[test]
    fn test_unknown_author_rejected() {
        let err = FixtureSet::from_json_str(&minimal_file("u9", "c1", 40, 1)).unwrap_err();
        assert!(matches!(err, VaultError::UserNotFound(id) if id == "u9"));
    }

    #[test]
    fn test_unknown_challenge_rejected() {
        let err = FixtureSet::from_json_str(&minimal_file("u1", "c7", 40, 1)).unwrap_err();
        assert!(matches!(err, VaultError::ChallengeNotFound(id) if id == "c7"));
    }

    #[test]
    fn test_score_above_hundred_rejected() {
        let err = FixtureSet::from_json_str(&minimal_file("u1", "c1", 101, 1)).unwrap_err();
        assert!(matches!(err, VaultError::ScoreOutOfRange { score: 101, .. }));
    }

    #[test]
    fn test_zero_rank_rejected() {
        let err = FixtureSet::from_json_str(&minimal_file("u1", "c1", 40, 0)).unwrap_err();
        assert!(matches!(err, VaultError::DeserializationError(_)));
    }
}
