//! Historical outcome lookup.
//!
//! Answers "the last times smart money looked like this, what did the price
//! do next?" by matching past composite sentiment within a tolerance band and
//! collecting forward returns from the price collaborator.

use crate::index::SentimentIndex;
use serde::{Deserialize, Serialize};
use smart_money_core::{EngineError, ForwardReturns, Result};

/// Absolute slack on the tolerance band.
const BAND_EPSILON: f64 = 1e-9;

/// Forward-return statistics over historical sentiment matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeStatistics {
    pub security_id: String,
    pub sentiment_value: f64,
    pub tolerance: f64,
    pub horizon_days: usize,
    /// Matches that had forward price data
    pub total_patterns: usize,
    /// Matches with a negative forward return
    pub declines: usize,
    /// Matches dropped because no forward price was available
    pub missing_price: usize,
    /// Percentage of matches with a negative forward return
    pub decline_rate_pct: Option<f64>,
    /// Mean forward return in percent
    pub avg_change_pct: Option<f64>,
}

impl OutcomeStatistics {
    /// False when no historical match had price data.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.total_patterns > 0
    }
}

/// Looks up what followed similar sentiment in a security's own history.
pub struct HistoricalOutcomeIndex<'a, P: ForwardReturns + ?Sized> {
    index: &'a SentimentIndex,
    prices: &'a P,
    tolerance: f64,
}

impl<'a, P: ForwardReturns + ?Sized> HistoricalOutcomeIndex<'a, P> {
    /// Creates an outcome index over a sentiment snapshot and price series.
    ///
    /// # Errors
    /// Returns `InvalidTolerance` if `tolerance` is negative or not finite.
    pub fn new(index: &'a SentimentIndex, prices: &'a P, tolerance: f64) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(EngineError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            index,
            prices,
            tolerance,
        })
    }

    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Collects forward returns after every historical date whose composite
    /// sentiment lies within the tolerance band of `sentiment_value`.
    ///
    /// # Errors
    /// Returns `InvalidHorizon` for a zero horizon and `InvalidSentiment`
    /// for a non-finite query value.
    pub fn outcomes(
        &self,
        security_id: &str,
        sentiment_value: f64,
        horizon_days: usize,
    ) -> Result<OutcomeStatistics> {
        if horizon_days == 0 {
            return Err(EngineError::InvalidHorizon(horizon_days));
        }
        if !sentiment_value.is_finite() {
            return Err(EngineError::InvalidSentiment(sentiment_value));
        }

        let mut returns = Vec::new();
        let mut missing_price = 0;

        let matches = self.index.history(security_id).filter(|r| {
            r.composite
                .value()
                .is_some_and(|v| (v - sentiment_value).abs() <= self.tolerance + BAND_EPSILON)
        });

        for record in matches {
            match self.prices.forward_return(security_id, record.date, horizon_days) {
                Some(r) if r.is_finite() => returns.push(r),
                _ => missing_price += 1,
            }
        }

        let total_patterns = returns.len();
        let declines = returns.iter().filter(|r| **r < 0.0).count();
        let (decline_rate_pct, avg_change_pct) = if total_patterns > 0 {
            let n = total_patterns as f64;
            (
                Some(declines as f64 / n * 100.0),
                Some(returns.iter().sum::<f64>() / n),
            )
        } else {
            tracing::debug!(
                security_id,
                sentiment_value,
                horizon_days,
                "no historical outcome data"
            );
            (None, None)
        };

        Ok(OutcomeStatistics {
            security_id: security_id.to_string(),
            sentiment_value,
            tolerance: self.tolerance,
            horizon_days,
            total_patterns,
            declines,
            missing_price,
            decline_rate_pct,
            avg_change_pct,
        })
    }
}
