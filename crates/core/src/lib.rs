//! Core types, lookup tables, and configuration for the smart-money flow engine.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod investor;
pub mod prices;
pub mod sentiment;
pub mod tables;

pub use config::{
    AlertConfig, DecisionConfig, EngineConfig, OutcomeConfig, PatternConfig, ScoringConfig,
    StrengthConfig,
};
pub use config_loader::ConfigLoader;
pub use error::{EngineError, Result};
pub use investor::{InvestorCatalog, InvestorType, QualityTier, TypeProfile};
pub use prices::{ForwardReturns, PriceHistory, PricePoint};
pub use sentiment::{
    saturating_sum, RawVolumeRecord, SecurityInfo, Sentiment, SentimentKey, SentimentRecord,
    TradeSide, TypeVolume,
};
pub use tables::{Quintile, QuintileBucket, QuintileTable, ScoringTables, WeightTable};
