//! Additive pattern-strength score.

use crate::pattern::PatternResult;
use serde::{Deserialize, Serialize};
use smart_money_core::{Sentiment, StrengthConfig};

const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl StrengthLevel {
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            70.. => Self::Critical,
            50..=69 => Self::High,
            25..=49 => Self::Moderate,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStrength {
    /// 0 to 100
    pub score: u32,
    pub level: StrengthLevel,
    /// Human-readable reasons for each awarded component
    pub factors: Vec<String>,
}

/// Sums streak, volume and sentiment-magnitude points, capped at 100.
#[must_use]
pub fn pattern_strength(
    composite: Sentiment,
    pattern: &PatternResult,
    config: &StrengthConfig,
) -> PatternStrength {
    let mut score = 0u32;
    let mut factors = Vec::new();

    match pattern.consecutive_sell_days {
        0 | 1 => {}
        2 => {
            score = score.saturating_add(config.two_day_streak_points);
            factors.push("2 consecutive selling days".to_string());
        }
        n => {
            score = score.saturating_add(config.long_streak_points);
            factors.push(format!("{n} consecutive selling days"));
        }
    }

    if pattern.has_volume_spike {
        score = score.saturating_add(config.volume_spike_points);
        match pattern.volume_ratio() {
            Some(ratio) => factors.push(format!("volume spike ({ratio:.1}x average)")),
            None => factors.push("volume spike".to_string()),
        }
    }

    if composite.below(config.extreme_bearish_threshold) {
        score = score.saturating_add(config.extreme_bearish_points);
        factors.push(format!("extreme bearish sentiment ({composite})"));
    } else if composite.below(config.bearish_threshold) {
        score = score.saturating_add(config.bearish_points);
        factors.push(format!("bearish sentiment ({composite})"));
    }

    let score = score.min(MAX_SCORE);
    PatternStrength {
        score,
        level: StrengthLevel::from_score(score),
        factors,
    }
}
