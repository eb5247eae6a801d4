//! Short-term behavioural patterns: selling/buying streaks and volume spikes.

use crate::index::SentimentIndex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smart_money_core::{EngineError, PatternConfig, Result, SentimentRecord};

/// Patterns found in a trailing window of one security's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    pub security_id: String,
    pub reference_date: NaiveDate,
    pub window_size: usize,
    /// Records actually found in the window
    pub days_observed: usize,
    pub consecutive_sell_days: usize,
    pub consecutive_buy_days: usize,
    pub has_volume_spike: bool,
    /// Total volume on the most recent date
    pub latest_volume: f64,
    /// Mean total volume over the window excluding the most recent date
    pub avg_volume: f64,
    /// True when any pattern threshold holds
    pub flagged: bool,
}

impl PatternResult {
    /// Unflagged, all-zero result for a window with no records.
    #[must_use]
    pub fn empty(
        security_id: impl Into<String>,
        reference_date: NaiveDate,
        window_size: usize,
    ) -> Self {
        Self {
            security_id: security_id.into(),
            reference_date,
            window_size,
            days_observed: 0,
            consecutive_sell_days: 0,
            consecutive_buy_days: 0,
            has_volume_spike: false,
            latest_volume: 0.0,
            avg_volume: 0.0,
            flagged: false,
        }
    }

    /// Latest volume as a multiple of the trailing average.
    #[must_use]
    pub fn volume_ratio(&self) -> Option<f64> {
        (self.avg_volume > 0.0).then(|| self.latest_volume / self.avg_volume)
    }
}

/// Detects streaks and volume spikes over a trailing window.
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    config: PatternConfig,
}

impl PatternDetector {
    #[must_use]
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Inspects the `window_size` most recent records on or before
    /// `reference_date`.
    ///
    /// # Errors
    /// Returns `InvalidWindow` if `window_size` is zero.
    pub fn detect(
        &self,
        index: &SentimentIndex,
        security_id: &str,
        reference_date: NaiveDate,
        window_size: usize,
    ) -> Result<PatternResult> {
        if window_size == 0 {
            return Err(EngineError::InvalidWindow(window_size));
        }

        let window = index.window(security_id, reference_date, window_size);
        Ok(self.evaluate(security_id, reference_date, window_size, &window))
    }

    /// Evaluates an already-selected window, oldest record first.
    #[must_use]
    pub fn evaluate(
        &self,
        security_id: &str,
        reference_date: NaiveDate,
        window_size: usize,
        window: &[&SentimentRecord],
    ) -> PatternResult {
        let Some((latest, prior)) = window.split_last() else {
            tracing::debug!(security_id, %reference_date, "no records in pattern window");
            return PatternResult::empty(security_id, reference_date, window_size);
        };

        let consecutive_sell_days = streak(window, |r| r.composite.is_bearish());
        let consecutive_buy_days = streak(window, |r| r.composite.is_bullish());

        let latest_volume = latest.total_volume();
        let avg_volume = if prior.is_empty() {
            0.0
        } else {
            prior.iter().map(|r| r.total_volume()).sum::<f64>() / prior.len() as f64
        };
        let has_volume_spike =
            avg_volume > 0.0 && latest_volume >= self.config.spike_multiplier * avg_volume;

        let flagged = consecutive_sell_days >= self.config.sell_streak_flag || has_volume_spike;

        tracing::trace!(
            security_id,
            %reference_date,
            consecutive_sell_days,
            consecutive_buy_days,
            has_volume_spike,
            flagged,
            "pattern evaluated"
        );

        PatternResult {
            security_id: security_id.to_string(),
            reference_date,
            window_size,
            days_observed: window.len(),
            consecutive_sell_days,
            consecutive_buy_days,
            has_volume_spike,
            latest_volume,
            avg_volume,
            flagged,
        }
    }
}

/// Counts records from the most recent backward while `pred` holds.
fn streak(window: &[&SentimentRecord], pred: impl Fn(&SentimentRecord) -> bool) -> usize {
    window.iter().rev().take_while(|r| pred(r)).count()
}
