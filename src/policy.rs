//! Static mapping from damage score to advisory text.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Message and display colour for one damage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskEntry {
    pub message: &'static str,
    pub color: &'static str,
}

/// Indexed by damage score.
pub const RISK_TABLE: [RiskEntry; 6] = [
    RiskEntry {
        message: "No risk, your hair is healthy!",
        color: "#27ae60",
    },
    RiskEntry {
        message: "Very mild risk, keep an eye on your hair!",
        color: "#f1c40f",
    },
    RiskEntry {
        message: "Mild risk, consider reducing heat usage!",
        color: "#e67e22",
    },
    RiskEntry {
        message: "Moderate risk, reduce heat styling frequency!",
        color: "#e74c3c",
    },
    RiskEntry {
        message: "High risk, significantly reduce heat usage!",
        color: "#c0392b",
    },
    RiskEntry {
        message: "Severe risk, stop heat styling immediately!",
        color: "#8e0000",
    },
];

/// Coarse grouping of scores that selects the care tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTier {
    /// Score 0
    Healthy,
    /// Scores 1 and 2
    Moderate,
    /// Scores 3 to 5
    Significant,
}

impl AdvisoryTier {
    /// Tier for a damage score.
    pub fn for_score(score: u8) -> Self {
        match score {
            0 => AdvisoryTier::Healthy,
            1..=2 => AdvisoryTier::Moderate,
            _ => AdvisoryTier::Significant,
        }
    }

    /// Line shown above the tips.
    pub fn headline(self) -> &'static str {
        match self {
            AdvisoryTier::Healthy => "Your hair routine looks great! Keep it up!",
            AdvisoryTier::Moderate => "Moderate risk detected. Tips to keep hair healthy:",
            AdvisoryTier::Significant => "Your hair is at significant risk! Consider:",
        }
    }

    /// Care tips for this tier.
    pub fn tips(self) -> &'static [&'static str] {
        match self {
            AdvisoryTier::Healthy => &[
                "Continue using low heat settings",
                "Regular conditioning will maintain healthy hair",
            ],
            AdvisoryTier::Moderate => &[
                "Always use heat protectant",
                "Limit sessions to under 20 minutes",
                "Try air drying occasionally",
            ],
            AdvisoryTier::Significant => &[
                "Use heat protectant spray before styling",
                "Reduce heat tool temperature below 180°C",
                "Take breaks from heat styling for at least 2-3 days per week",
                "Deep condition your hair weekly",
            ],
        }
    }
}

impl fmt::Display for AdvisoryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdvisoryTier::Healthy => "healthy",
            AdvisoryTier::Moderate => "moderate risk",
            AdvisoryTier::Significant => "significant risk",
        })
    }
}

/// Looks up a classifier label, rejecting anything outside 0..=5.
pub fn lookup(label: usize) -> Result<(u8, &'static RiskEntry)> {
    RISK_TABLE
        .get(label)
        .map(|entry| (label as u8, entry))
        .ok_or(Error::ClassifierOutOfDomain { label })
}
