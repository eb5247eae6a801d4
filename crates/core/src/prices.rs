//! Price-series collaborator used for historical outcome lookups.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source of forward returns over a trading-day horizon.
pub trait ForwardReturns: Send + Sync {
    /// Percentage return from the close on `date` to the close
    /// `horizon_days` trading days later.
    ///
    /// Returns `None` when either end of the window has no price.
    fn forward_return(&self, security_id: &str, date: NaiveDate, horizon_days: usize)
        -> Option<f64>;
}

/// Closing price for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// In-memory daily closes keyed by security.
///
/// Each series is kept sorted by date with one entry per day, so the
/// n-th following entry is the n-th following trading day.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    series: HashMap<String, Vec<PricePoint>>,
}

impl PriceHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from unordered `(security, point)` pairs.
    ///
    /// Later duplicates for the same (security, date) replace earlier ones.
    pub fn from_points<I, S>(points: I) -> Self
    where
        I: IntoIterator<Item = (S, PricePoint)>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for (security_id, point) in points {
            history.insert(security_id, point);
        }
        history
    }

    /// Inserts one closing price, keeping the series sorted.
    pub fn insert(&mut self, security_id: impl Into<String>, point: PricePoint) {
        let series = self.series.entry(security_id.into()).or_default();
        match series.binary_search_by_key(&point.date, |p| p.date) {
            Ok(i) => series[i] = point,
            Err(i) => series.insert(i, point),
        }
    }

    /// Sorted closes for a security.
    #[must_use]
    pub fn series(&self, security_id: &str) -> &[PricePoint] {
        self.series.get(security_id).map_or(&[], Vec::as_slice)
    }

    /// Number of securities with at least one price.
    #[must_use]
    pub fn security_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl ForwardReturns for PriceHistory {
    fn forward_return(
        &self,
        security_id: &str,
        date: NaiveDate,
        horizon_days: usize,
    ) -> Option<f64> {
        let series = self.series(security_id);
        let start = series.binary_search_by_key(&date, |p| p.date).ok()?;
        let entry = series.get(start)?.close;
        let exit = series.get(start.checked_add(horizon_days)?)?.close;

        if entry <= Decimal::ZERO {
            return None;
        }

        ((exit - entry) / entry * Decimal::ONE_HUNDRED).to_f64()
    }
}
