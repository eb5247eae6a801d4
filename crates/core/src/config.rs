use crate::error::{EngineError, Result};
use crate::tables::ScoringTables;
use serde::{Deserialize, Serialize};

/// Top-level engine configuration. Every section falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub pattern: PatternConfig,
    pub outcomes: OutcomeConfig,
    pub scoring: ScoringConfig,
    pub alert: AlertConfig,
    pub decision: DecisionConfig,
    pub tables: ScoringTables,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Trailing window in trading days
    pub window_size: usize,
    /// Latest volume must reach this multiple of the trailing average
    pub spike_multiplier: f64,
    /// Sell streak length that flags a pattern
    pub sell_streak_flag: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            spike_multiplier: 2.0,
            sell_streak_flag: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeConfig {
    /// Half-width of the sentiment band that counts as a match
    pub tolerance: f64,
    /// Forward horizon in trading days
    pub horizon_days: usize,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            horizon_days: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// |sentiment| above this counts as bullish/bearish for consensus
    pub consensus_band: f64,
    /// Preceding records averaged into the trend baseline
    pub trend_lookback_days: usize,
    /// |delta| below this is a stable trend
    pub trend_stable_band: f64,
    /// |delta| below this (and above stable) is a slight trend
    pub trend_slight_band: f64,
    pub strength: StrengthConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            consensus_band: 0.1,
            trend_lookback_days: 5,
            trend_stable_band: 0.05,
            trend_slight_band: 0.15,
            strength: StrengthConfig::default(),
        }
    }
}

/// Additive pattern-strength points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConfig {
    /// Points for exactly two consecutive sell days
    pub two_day_streak_points: u32,
    /// Points for three or more consecutive sell days
    pub long_streak_points: u32,
    /// Points for a volume spike
    pub volume_spike_points: u32,
    /// Composite below this earns `bearish_points`
    pub bearish_threshold: f64,
    pub bearish_points: u32,
    /// Composite below this earns `extreme_bearish_points` instead
    pub extreme_bearish_threshold: f64,
    pub extreme_bearish_points: u32,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            two_day_streak_points: 15,
            long_streak_points: 40,
            volume_spike_points: 20,
            bearish_threshold: -0.5,
            bearish_points: 20,
            extreme_bearish_threshold: -0.7,
            extreme_bearish_points: 30,
        }
    }
}

/// Portfolio-wide risk alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// HIGH when composite is below this and the sell streak is long
    pub high_sentiment: f64,
    pub high_sell_streak: usize,
    /// HIGH regardless of streak below this composite
    pub critical_sentiment: f64,
    /// MEDIUM below this composite
    pub medium_sentiment: f64,
    /// MEDIUM at this sell streak
    pub medium_sell_streak: usize,
    /// BULLISH above this composite when volume spikes
    pub bullish_sentiment: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            high_sentiment: -0.5,
            high_sell_streak: 3,
            critical_sentiment: -0.7,
            medium_sentiment: -0.3,
            medium_sell_streak: 2,
            bullish_sentiment: 0.5,
        }
    }
}

/// Trade-specific traffic-light threshold, kept apart from [`AlertConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Symmetric band: above +threshold is bullish, below -threshold bearish
    pub threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self { threshold: 0.3 }
    }
}

impl EngineConfig {
    /// Validates every section.
    ///
    /// # Errors
    /// Returns `InvalidConfig` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.pattern.window_size == 0 {
            return Err(EngineError::config("pattern.window_size must be at least 1"));
        }
        if !(self.pattern.spike_multiplier.is_finite() && self.pattern.spike_multiplier > 0.0) {
            return Err(EngineError::config(format!(
                "pattern.spike_multiplier must be positive, got {}",
                self.pattern.spike_multiplier
            )));
        }
        if self.outcomes.horizon_days == 0 {
            return Err(EngineError::config("outcomes.horizon_days must be at least 1"));
        }
        if !(self.outcomes.tolerance.is_finite() && self.outcomes.tolerance >= 0.0) {
            return Err(EngineError::config(format!(
                "outcomes.tolerance must be non-negative, got {}",
                self.outcomes.tolerance
            )));
        }
        if self.scoring.trend_lookback_days == 0 {
            return Err(EngineError::config(
                "scoring.trend_lookback_days must be at least 1",
            ));
        }
        if self.scoring.trend_stable_band > self.scoring.trend_slight_band {
            return Err(EngineError::config(
                "scoring.trend_stable_band must not exceed scoring.trend_slight_band",
            ));
        }
        if !(self.decision.threshold > 0.0 && self.decision.threshold <= 1.0) {
            return Err(EngineError::config(format!(
                "decision.threshold must be in (0, 1], got {}",
                self.decision.threshold
            )));
        }
        self.tables.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_window_rejected() {
        let mut config = EngineConfig::default();
        config.pattern.window_size = 0;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(msg)) if msg.contains("window_size")
        ));
    }

    #[test]
    fn zero_horizon_rejected() {
        let mut config = EngineConfig::default();
        config.outcomes.horizon_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_tolerance_rejected() {
        let mut config = EngineConfig::default();
        config.outcomes.tolerance = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn decision_threshold_out_of_range_rejected() {
        let mut config = EngineConfig::default();
        config.decision.threshold = 0.0;
        assert!(config.validate().is_err());
        config.decision.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_trend_bands_rejected() {
        let mut config = EngineConfig::default();
        config.scoring.trend_stable_band = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn decision_and_alert_thresholds_are_independent() {
        let config = EngineConfig::default();
        assert!((config.decision.threshold - 0.3).abs() < f64::EPSILON);
        assert!((config.alert.medium_sentiment + 0.3).abs() < f64::EPSILON);
        assert!((config.alert.high_sentiment + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"pattern": {"window_size": 10}}"#).unwrap();
        assert_eq!(config.pattern.window_size, 10);
        assert!((config.pattern.spike_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.outcomes, OutcomeConfig::default());
    }
}
