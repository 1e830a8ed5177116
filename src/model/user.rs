//! User and access tier structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VaultError;

/// Access tier, 1 (RECRUIT) through 5 (IDOL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    Recruit = 1,
    Analyst = 2,
    Operator = 3,
    Specialist = 4,
    Idol = 5,
}

/// Static catalogue entry describing what a tier costs and unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierInfo {
    pub tier: Tier,
    pub label: &'static str,
    pub color: &'static str,
    pub price: &'static str,
    pub required_rep: u32,
    /// `None` means unlimited
    pub monthly_submissions: Option<u32>,
    pub perks: [&'static str; 4],
}

static TIER_CATALOGUE: [TierInfo; 5] = [
    TierInfo {
        tier: Tier::Recruit,
        label: "RECRUIT",
        color: "#94a3b8",
        price: "FREE",
        required_rep: 0,
        monthly_submissions: Some(2),
        perks: [
            "2 submissions/mo",
            "View all challenges",
            "Basic leaderboard",
            "Community access",
        ],
    },
    TierInfo {
        tier: Tier::Analyst,
        label: "ANALYST",
        color: "#60a5fa",
        price: "₹99",
        required_rep: 100,
        monthly_submissions: Some(8),
        perks: [
            "8 submissions/mo",
            "Cash reward eligible",
            "Rep discount system",
            "Priority scoring",
        ],
    },
    TierInfo {
        tier: Tier::Operator,
        label: "OPERATOR",
        color: "#00d4ff",
        price: "₹299",
        required_rep: 500,
        monthly_submissions: Some(20),
        perks: [
            "20 submissions/mo",
            "Post challenges",
            "Ad-reduced feed",
            "Analytics dashboard",
        ],
    },
    TierInfo {
        tier: Tier::Specialist,
        label: "SPECIALIST",
        color: "#a855f7",
        price: "₹599",
        required_rep: 1500,
        monthly_submissions: Some(40),
        perks: [
            "40 submissions/mo",
            "Ad-free experience",
            "API access",
            "Priority support",
        ],
    },
    TierInfo {
        tier: Tier::Idol,
        label: "IDOL",
        color: "#f59e0b",
        price: "₹999",
        required_rep: 5000,
        monthly_submissions: None,
        perks: [
            "Unlimited submissions",
            "20% revenue share",
            "Exclusive badge",
            "Direct admin line",
        ],
    },
];

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Recruit,
        Tier::Analyst,
        Tier::Operator,
        Tier::Specialist,
        Tier::Idol,
    ];

    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn info(self) -> &'static TierInfo {
        &TIER_CATALOGUE[(self.level() - 1) as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn color(self) -> &'static str {
        self.info().color
    }

    pub fn required_rep(self) -> u32 {
        self.info().required_rep
    }

    /// Challenge posting opens at OPERATOR
    pub fn can_post_challenges(self) -> bool {
        self >= Tier::Operator
    }

    /// Highest tier whose reputation requirement `rep` satisfies
    pub fn highest_unlocked(rep: u32) -> Tier {
        Tier::ALL
            .iter()
            .rev()
            .copied()
            .find(|t| rep >= t.required_rep())
            .unwrap_or(Tier::Recruit)
    }
}

impl TryFrom<u8> for Tier {
    type Error = VaultError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::Recruit),
            2 => Ok(Tier::Analyst),
            3 => Ok(Tier::Operator),
            4 => Ok(Tier::Specialist),
            5 => Ok(Tier::Idol),
            other => Err(VaultError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.level()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Platform user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Two-letter glyph shown in place of a picture
    pub avatar: String,
    pub tier: Tier,
    pub rep: u32,
}

impl User {
    /// Reputation gates every tier, whatever was paid for
    pub fn is_eligible_for(&self, tier: Tier) -> bool {
        self.rep >= tier.required_rep()
    }
}
