//! Portfolio-wide risk alert classification.

use crate::pattern::PatternResult;
use serde::{Deserialize, Serialize};
use smart_money_core::{AlertConfig, Sentiment};
use std::fmt;

/// Alert levels, checked in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    High,
    Medium,
    Bullish,
    Clear,
}

impl AlertLevel {
    /// Ordering key for alert listings; higher is more urgent.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Bullish => 1,
            Self::Clear => 0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Bullish => "BULLISH",
            Self::Clear => "CLEAR",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub reason: String,
    pub action: String,
}

impl Alert {
    fn new(level: AlertLevel, reason: String, action: &str) -> Self {
        Self {
            level,
            reason,
            action: action.to_string(),
        }
    }
}

/// Classifies a composite and its pattern into exactly one alert level.
///
/// An absent composite fails every sentiment condition, so only the streak
/// rules can fire for it.
#[must_use]
pub fn classify_alert(
    composite: Sentiment,
    pattern: &PatternResult,
    config: &AlertConfig,
) -> Alert {
    let streak = pattern.consecutive_sell_days;

    if composite.below(config.high_sentiment) && streak >= config.high_sell_streak {
        return Alert::new(
            AlertLevel::High,
            format!("sustained selling: composite {composite} with {streak} consecutive sell days"),
            "Reduce exposure or tighten stops",
        );
    }
    if composite.below(config.critical_sentiment) {
        return Alert::new(
            AlertLevel::High,
            format!("extreme selling pressure: composite {composite}"),
            "Reduce exposure or tighten stops",
        );
    }
    if composite.below(config.medium_sentiment) {
        return Alert::new(
            AlertLevel::Medium,
            format!("bearish smart-money flow: composite {composite}"),
            "Monitor closely and avoid adding to the position",
        );
    }
    if streak >= config.medium_sell_streak {
        return Alert::new(
            AlertLevel::Medium,
            format!("{streak} consecutive sell days"),
            "Monitor closely and avoid adding to the position",
        );
    }
    if composite.above(config.bullish_sentiment) && pattern.has_volume_spike {
        return Alert::new(
            AlertLevel::Bullish,
            format!("strong accumulation on a volume spike: composite {composite}"),
            "Consider entering or adding to the position",
        );
    }

    Alert::new(
        AlertLevel::Clear,
        "no significant smart-money pattern".to_string(),
        "No action required",
    )
}
