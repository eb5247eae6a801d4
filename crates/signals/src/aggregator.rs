//! Sentiment aggregation.
//!
//! Turns raw per-category volume records into one [`SentimentRecord`] per
//! (security, date). Malformed records are dropped and counted, never fatal.

use crate::index::SentimentIndex;
use serde::{Deserialize, Serialize};
use smart_money_core::{
    saturating_sum, InvestorType, RawVolumeRecord, SentimentKey, SentimentRecord, TradeSide,
    TypeVolume,
};
use std::collections::BTreeMap;

/// Counts of accepted and dropped raw records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    pub accepted: usize,
    pub missing_security: usize,
    pub missing_date: usize,
    pub invalid_volume: usize,
    pub unknown_type: usize,
}

impl AggregationStats {
    /// Total dropped records.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.missing_security + self.missing_date + self.invalid_volume + self.unknown_type
    }
}

/// Aggregates raw volume records into an index of sentiment records.
pub fn aggregate<'a, I>(records: I) -> SentimentIndex
where
    I: IntoIterator<Item = &'a RawVolumeRecord>,
{
    aggregate_with_stats(records).0
}

/// Aggregates raw volume records and reports how many were dropped.
///
/// The output does not depend on input order: volumes for each
/// (security, date, type, side) are summed in sorted order, so shuffled
/// input produces bit-identical floating-point totals.
pub fn aggregate_with_stats<'a, I>(records: I) -> (SentimentIndex, AggregationStats)
where
    I: IntoIterator<Item = &'a RawVolumeRecord>,
{
    let mut stats = AggregationStats::default();
    let mut grouped: BTreeMap<SentimentKey, BTreeMap<InvestorType, SideVolumes>> = BTreeMap::new();

    for raw in records {
        let Some((key, investor_type)) = validate(raw, &mut stats) else {
            continue;
        };

        grouped
            .entry(key)
            .or_default()
            .entry(investor_type)
            .or_default()
            .push(raw.side, raw.volume);
        stats.accepted += 1;
    }

    let index: SentimentIndex = grouped
        .into_iter()
        .map(|(key, per_type)| {
            let per_type = per_type
                .into_iter()
                .map(|(t, volumes)| (t, volumes.finish()))
                .collect();
            SentimentRecord::from_volumes(key.security_id, key.date, per_type)
        })
        .collect();

    if stats.rejected() > 0 {
        tracing::info!(
            accepted = stats.accepted,
            rejected = stats.rejected(),
            "aggregated {} sentiment records",
            index.len()
        );
    } else {
        tracing::debug!(accepted = stats.accepted, "aggregated {} sentiment records", index.len());
    }

    (index, stats)
}

fn validate(
    raw: &RawVolumeRecord,
    stats: &mut AggregationStats,
) -> Option<(SentimentKey, InvestorType)> {
    let security_id = match raw.security_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => {
            tracing::debug!(?raw, "skipping record without security id");
            stats.missing_security += 1;
            return None;
        }
    };

    let Some(date) = raw.date else {
        tracing::debug!(security_id, "skipping record without date");
        stats.missing_date += 1;
        return None;
    };

    if !(raw.volume.is_finite() && raw.volume > 0.0) {
        tracing::debug!(security_id, %date, volume = raw.volume, "skipping non-positive volume");
        stats.invalid_volume += 1;
        return None;
    }

    let Some(investor_type) = InvestorType::from_code(&raw.investor_type) else {
        tracing::debug!(
            security_id,
            %date,
            code = %raw.investor_type,
            "skipping unknown investor type"
        );
        stats.unknown_type += 1;
        return None;
    };

    Some((SentimentKey::new(security_id, date), investor_type))
}

/// Raw volumes collected per side before summation.
#[derive(Debug, Default)]
struct SideVolumes {
    buys: Vec<f64>,
    sells: Vec<f64>,
}

impl SideVolumes {
    fn push(&mut self, side: TradeSide, volume: f64) {
        match side {
            TradeSide::Buy => self.buys.push(volume),
            TradeSide::Sell => self.sells.push(volume),
        }
    }

    fn finish(mut self) -> TypeVolume {
        TypeVolume::new(sorted_sum(&mut self.buys), sorted_sum(&mut self.sells))
    }
}

fn sorted_sum(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    saturating_sum(values.iter().copied())
}
