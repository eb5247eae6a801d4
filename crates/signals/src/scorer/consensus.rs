//! Agreement among investor types on the direction of flow.

use serde::{Deserialize, Serialize};
use smart_money_core::SentimentRecord;
use std::fmt;

/// Direction of one type's flow, or of the majority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// How strongly the types agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusLevel {
    /// Every type agrees
    Unanimous,
    /// At least 80% agree
    Strong,
    /// At least 60% agree
    Moderate,
    Weak,
    /// No type had data
    NoData,
}

impl ConsensusLevel {
    fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            Self::Unanimous
        } else if ratio >= 0.8 {
            Self::Strong
        } else if ratio >= 0.6 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unanimous => "Unanimous",
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
            Self::NoData => "No Data",
        }
    }
}

/// Vote counts and the resulting consensus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub direction: FlowDirection,
    pub level: ConsensusLevel,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    /// Types with present sentiment
    pub total: usize,
    /// Majority count over total; `None` without data
    pub ratio: Option<f64>,
}

/// Counts bullish/bearish/neutral votes among types with data.
///
/// A type votes bullish above `+band`, bearish below `-band`, neutral
/// otherwise. A tie for the largest count resolves to neutral.
#[must_use]
pub fn consensus(record: &SentimentRecord, band: f64) -> Consensus {
    let (mut bullish, mut bearish, mut neutral) = (0, 0, 0);
    for (_, s) in record.present_types() {
        if s > band {
            bullish += 1;
        } else if s < -band {
            bearish += 1;
        } else {
            neutral += 1;
        }
    }

    let total = bullish + bearish + neutral;
    if total == 0 {
        return Consensus {
            direction: FlowDirection::Neutral,
            level: ConsensusLevel::NoData,
            bullish,
            bearish,
            neutral,
            total,
            ratio: None,
        };
    }

    let direction = if bullish > bearish && bullish > neutral {
        FlowDirection::Bullish
    } else if bearish > bullish && bearish > neutral {
        FlowDirection::Bearish
    } else {
        FlowDirection::Neutral
    };

    let majority = bullish.max(bearish).max(neutral);
    let ratio = majority as f64 / total as f64;

    Consensus {
        direction,
        level: ConsensusLevel::from_ratio(ratio),
        bullish,
        bearish,
        neutral,
        total,
        ratio: Some(ratio),
    }
}
