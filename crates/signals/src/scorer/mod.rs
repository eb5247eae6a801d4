//! Signal scoring.
//!
//! Turns one sentiment record plus its pattern and recent history into a
//! [`SignalScore`]: consensus across investor types, trend against a rolling
//! baseline, the predictive-quality weighted composite, the quintile
//! estimate, an additive pattern-strength score, and the alert level.
//!
//! Every sub-computation is a pure function of its inputs and the injected
//! tables; the submodules expose them individually.

pub mod alert;
pub mod consensus;
pub mod quintile;
pub mod strength;
pub mod trend;
pub mod weighted;

pub use alert::{classify_alert, Alert, AlertLevel};
pub use consensus::{consensus, Consensus, ConsensusLevel, FlowDirection};
pub use quintile::{quintile_estimate, QuintileEstimate};
pub use strength::{pattern_strength, PatternStrength, StrengthLevel};
pub use trend::{trend, Trend, TrendDirection};
pub use weighted::{weighted_sentiment, PredictorContribution, WeightedSentiment};

use crate::pattern::PatternResult;
use serde::{Deserialize, Serialize};
use smart_money_core::{AlertConfig, ScoringConfig, ScoringTables, SentimentRecord};

/// Full score for one (security, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalScore {
    pub consensus: Consensus,
    pub trend: Trend,
    pub weighted: WeightedSentiment,
    pub quintile: Option<QuintileEstimate>,
    pub pattern_strength: PatternStrength,
    pub alert: Alert,
}

/// Scores sentiment records against calibrated tables.
#[derive(Debug, Clone, Default)]
pub struct SignalScorer {
    tables: ScoringTables,
    config: ScoringConfig,
    alert: AlertConfig,
}

impl SignalScorer {
    #[must_use]
    pub fn new(tables: ScoringTables, config: ScoringConfig, alert: AlertConfig) -> Self {
        Self {
            tables,
            config,
            alert,
        }
    }

    #[must_use]
    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores `record`.
    ///
    /// `history` holds earlier records of the same security, oldest first.
    /// Entries dated on or after `record` are ignored.
    #[must_use]
    pub fn score(
        &self,
        record: &SentimentRecord,
        history: &[&SentimentRecord],
        pattern: &PatternResult,
    ) -> SignalScore {
        let preceding: Vec<&SentimentRecord> = history
            .iter()
            .copied()
            .filter(|r| r.security_id == record.security_id && r.date < record.date)
            .collect();

        let score = SignalScore {
            consensus: consensus(record, self.config.consensus_band),
            trend: trend(record.composite, &preceding, &self.config),
            weighted: weighted_sentiment(record, &self.tables),
            quintile: quintile_estimate(record.composite, &self.tables.quintiles),
            pattern_strength: pattern_strength(record.composite, pattern, &self.config.strength),
            alert: classify_alert(record.composite, pattern, &self.alert),
        };

        tracing::debug!(
            security_id = %record.security_id,
            date = %record.date,
            alert = %score.alert.level,
            strength = score.pattern_strength.score,
            trend = %score.trend.direction,
            "signal scored"
        );

        score
    }
}
