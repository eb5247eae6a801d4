//! Current composite versus its recent baseline.

use serde::{Deserialize, Serialize};
use smart_money_core::{ScoringConfig, Sentiment, SentimentRecord};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    SlightlyImproving,
    Stable,
    SlightlyDeteriorating,
    Deteriorating,
    /// Fewer than two baseline points or no current value
    Unknown,
}

impl TrendDirection {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::SlightlyImproving => "Slightly Improving",
            Self::Stable => "Stable",
            Self::SlightlyDeteriorating => "Slightly Deteriorating",
            Self::Deteriorating => "Deteriorating",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub current: Option<f64>,
    /// Mean present composite over the lookback records
    pub baseline: Option<f64>,
    pub delta: Option<f64>,
    /// Lookback records with a present composite
    pub points: usize,
}

/// Classifies `current` against the mean of the present composites in
/// `preceding` (oldest first; only the last `trend_lookback_days` are used).
#[must_use]
pub fn trend(current: Sentiment, preceding: &[&SentimentRecord], config: &ScoringConfig) -> Trend {
    let start = preceding.len().saturating_sub(config.trend_lookback_days);
    let values: Vec<f64> = preceding[start..]
        .iter()
        .filter_map(|r| r.composite.value())
        .collect();
    let points = values.len();
    let baseline = (points > 0).then(|| values.iter().sum::<f64>() / points as f64);

    let (Some(current), Some(baseline), true) = (current.value(), baseline, points >= 2) else {
        return Trend {
            direction: TrendDirection::Unknown,
            current: current.value(),
            baseline,
            delta: None,
            points,
        };
    };

    let delta = current - baseline;
    let direction = if delta.abs() < config.trend_stable_band {
        TrendDirection::Stable
    } else if delta.abs() < config.trend_slight_band {
        if delta > 0.0 {
            TrendDirection::SlightlyImproving
        } else {
            TrendDirection::SlightlyDeteriorating
        }
    } else if delta > 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Deteriorating
    };

    Trend {
        direction,
        current: Some(current),
        baseline: Some(baseline),
        delta: Some(delta),
        points,
    }
}
