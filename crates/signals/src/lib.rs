//! Smart-money flow analytics.
//!
//! Aggregates institutional trading volume into per-security sentiment,
//! detects short-term patterns, looks up historical outcomes, scores the
//! signal and turns it into buy/sell guidance.

pub mod aggregator;
pub mod decision;
pub mod engine;
pub mod index;
pub mod outcome;
pub mod pattern;
pub mod report;
pub mod scorer;

pub use aggregator::{aggregate, aggregate_with_stats, AggregationStats};
pub use decision::{
    Alignment, DecisionEngine, LightColor, Recommendation, TradeAction, TrafficLight,
};
pub use engine::{SecurityReport, SmartMoneyEngine};
pub use index::SentimentIndex;
pub use outcome::{HistoricalOutcomeIndex, OutcomeStatistics};
pub use pattern::{PatternDetector, PatternResult};
pub use report::alert_table;
pub use scorer::{
    Alert, AlertLevel, Consensus, ConsensusLevel, FlowDirection, PatternStrength,
    PredictorContribution, QuintileEstimate, SignalScore, SignalScorer, StrengthLevel, Trend,
    TrendDirection, WeightedSentiment,
};
