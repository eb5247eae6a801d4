//! Sentiment values and the per-(security, date) sentiment record.
//!
//! Zero is a valid neutral reading, so "no data" is carried as
//! [`Sentiment::Absent`] everywhere instead of being folded into zero.

use crate::investor::InvestorType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A sentiment reading in [-1, 1], or an explicit absence of data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Sentiment {
    /// Net imbalance ratio in [-1, 1]
    Present(f64),
    /// No volume was recorded
    #[default]
    Absent,
}

impl Sentiment {
    /// Computes `(buy - sell) / (buy + sell)`.
    ///
    /// Returns `Absent` unless both volumes are finite and the total is
    /// strictly positive. A total that overflows is computed on halved volumes.
    #[must_use]
    pub fn from_volumes(buy: f64, sell: f64) -> Self {
        if !(buy.is_finite() && sell.is_finite()) {
            return Self::Absent;
        }
        let (buy, sell) = if (buy + sell).is_finite() {
            (buy, sell)
        } else {
            (buy / 2.0, sell / 2.0)
        };
        let total = buy + sell;
        if total > 0.0 {
            Self::Present(((buy - sell) / total).clamp(-1.0, 1.0))
        } else {
            Self::Absent
        }
    }

    /// Returns the value if present.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Strictly positive reading. Zero and absent are non-directional.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        matches!(self, Self::Present(v) if v > 0.0)
    }

    /// Strictly negative reading. Zero and absent are non-directional.
    #[must_use]
    pub fn is_bearish(self) -> bool {
        matches!(self, Self::Present(v) if v < 0.0)
    }

    /// True when present and strictly below `threshold`.
    #[must_use]
    pub fn below(self, threshold: f64) -> bool {
        matches!(self, Self::Present(v) if v < threshold)
    }

    /// True when present and strictly above `threshold`.
    #[must_use]
    pub fn above(self, threshold: f64) -> bool {
        matches!(self, Self::Present(v) if v > threshold)
    }
}

impl From<Option<f64>> for Sentiment {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Present(v),
            _ => Self::Absent,
        }
    }
}

impl From<Sentiment> for Option<f64> {
    fn from(value: Sentiment) -> Self {
        value.value()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(v) => write!(f, "{v:+.3}"),
            Self::Absent => f.write_str("n/a"),
        }
    }
}

/// Side of a raw volume record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    #[serde(alias = "BUY", alias = "Buy", alias = "B", alias = "b")]
    Buy,
    #[serde(alias = "SELL", alias = "Sell", alias = "S", alias = "s")]
    Sell,
}

/// One raw end-of-day volume record as supplied by the ingestion layer.
///
/// Identity fields are optional because upstream tables can be incomplete;
/// the aggregator drops such records instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVolumeRecord {
    /// Security identifier (ISIN or similar)
    pub security_id: Option<String>,
    /// Trading date
    pub date: Option<NaiveDate>,
    /// Single-letter investor-type code
    pub investor_type: String,
    /// Buy or sell
    pub side: TradeSide,
    /// Traded volume
    pub volume: f64,
}

impl RawVolumeRecord {
    /// Creates a complete record.
    #[must_use]
    pub fn new(
        security_id: impl Into<String>,
        date: NaiveDate,
        investor_type: InvestorType,
        side: TradeSide,
        volume: f64,
    ) -> Self {
        Self {
            security_id: Some(security_id.into()),
            date: Some(date),
            investor_type: investor_type.code().to_string(),
            side,
            volume,
        }
    }
}

/// Composite key for a sentiment record. Orders by security, then date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SentimentKey {
    pub security_id: String,
    pub date: NaiveDate,
}

impl SentimentKey {
    #[must_use]
    pub fn new(security_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            security_id: security_id.into(),
            date,
        }
    }
}

impl fmt::Display for SentimentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.security_id, self.date)
    }
}

/// Summed volume for one investor type on one date.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeVolume {
    pub buy_volume: f64,
    pub sell_volume: f64,
}

impl TypeVolume {
    #[must_use]
    pub const fn new(buy_volume: f64, sell_volume: f64) -> Self {
        Self {
            buy_volume,
            sell_volume,
        }
    }

    /// Adds volume on the given side.
    pub fn add(&mut self, side: TradeSide, volume: f64) {
        match side {
            TradeSide::Buy => self.buy_volume += volume,
            TradeSide::Sell => self.sell_volume += volume,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.buy_volume + self.sell_volume
    }

    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_volumes(self.buy_volume, self.sell_volume)
    }
}

/// Aggregated smart-money sentiment for one security on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub security_id: String,
    pub date: NaiveDate,
    /// Summed volume per investor type (only types that traded)
    pub per_type: BTreeMap<InvestorType, TypeVolume>,
    /// Sentiment per investor type; every category has an entry
    pub type_sentiment: BTreeMap<InvestorType, Sentiment>,
    /// Net imbalance across all investor types
    pub composite: Sentiment,
    pub total_buy_volume: f64,
    pub total_sell_volume: f64,
}

impl SentimentRecord {
    /// Builds a record from summed per-type volumes, deriving every
    /// sentiment field.
    #[must_use]
    pub fn from_volumes(
        security_id: impl Into<String>,
        date: NaiveDate,
        per_type: BTreeMap<InvestorType, TypeVolume>,
    ) -> Self {
        let type_sentiment = InvestorType::ALL
            .iter()
            .map(|t| {
                let sentiment = per_type
                    .get(t)
                    .map_or(Sentiment::Absent, TypeVolume::sentiment);
                (*t, sentiment)
            })
            .collect();

        let total_buy_volume = saturating_sum(per_type.values().map(|v| v.buy_volume));
        let total_sell_volume = saturating_sum(per_type.values().map(|v| v.sell_volume));

        Self {
            security_id: security_id.into(),
            date,
            per_type,
            type_sentiment,
            composite: Sentiment::from_volumes(total_buy_volume, total_sell_volume),
            total_buy_volume,
            total_sell_volume,
        }
    }

    /// Record for a (security, date) with no smart-money volume.
    #[must_use]
    pub fn empty(security_id: impl Into<String>, date: NaiveDate) -> Self {
        Self::from_volumes(security_id, date, BTreeMap::new())
    }

    #[must_use]
    pub fn key(&self) -> SentimentKey {
        SentimentKey::new(self.security_id.clone(), self.date)
    }

    /// Sentiment of one investor type.
    #[must_use]
    pub fn sentiment_of(&self, investor_type: InvestorType) -> Sentiment {
        self.type_sentiment
            .get(&investor_type)
            .copied()
            .unwrap_or_default()
    }

    /// Investor types with a present sentiment, in catalog order.
    pub fn present_types(&self) -> impl Iterator<Item = (InvestorType, f64)> + '_ {
        self.type_sentiment
            .iter()
            .filter_map(|(t, s)| s.value().map(|v| (*t, v)))
    }

    /// Total buy plus sell volume.
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.total_buy_volume + self.total_sell_volume
    }
}

/// Sums volumes, capping at `f64::MAX` instead of overflowing to infinity.
pub fn saturating_sum(volumes: impl IntoIterator<Item = f64>) -> f64 {
    volumes.into_iter().sum::<f64>().min(f64::MAX)
}

/// Security reference data, passed through for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityInfo {
    pub security_id: String,
    pub symbol: String,
    pub company_name: String,
}
