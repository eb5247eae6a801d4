//! Static calibration tables: predictive weights and quintile outcomes.
//!
//! The defaults come from historical backtests. Tables are plain data so a
//! scorer can be built with alternate calibrations in tests or from config.

use crate::error::{EngineError, Result};
use crate::investor::{InvestorCatalog, InvestorType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Predictive weights used by the weighted composite.
///
/// Two maps exist because the foreign-flow category dominates the
/// normalization base; when it has no data the remaining categories are
/// re-weighted with `without_foreign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// Weights applied when the foreign-flow category has data
    pub with_foreign: BTreeMap<InvestorType, f64>,
    /// Weights applied when the foreign-flow category has no data
    pub without_foreign: BTreeMap<InvestorType, f64>,
}

impl WeightTable {
    /// Selects the weight map for the given foreign-flow availability.
    #[must_use]
    pub fn weights(&self, foreign_present: bool) -> &BTreeMap<InvestorType, f64> {
        if foreign_present {
            &self.with_foreign
        } else {
            &self.without_foreign
        }
    }

    /// Weight of one category (zero when not listed).
    #[must_use]
    pub fn weight(&self, investor_type: InvestorType, foreign_present: bool) -> f64 {
        self.weights(foreign_present)
            .get(&investor_type)
            .copied()
            .unwrap_or(0.0)
    }

    fn validate(&self) -> Result<()> {
        for (name, map) in [
            ("with_foreign", &self.with_foreign),
            ("without_foreign", &self.without_foreign),
        ] {
            if let Some((t, w)) = map.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
                return Err(EngineError::config(format!(
                    "weight table {name}: weight for {} must be non-negative, got {w}",
                    t.code()
                )));
            }
        }
        Ok(())
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            with_foreign: BTreeMap::from([
                (InvestorType::Foreign, 0.35),
                (InvestorType::PensionInsurance, 0.22),
                (InvestorType::MutualFund, 0.15),
                (InvestorType::PortfolioManager, 0.12),
                (InvestorType::Proprietary, 0.06),
                (InvestorType::ForeignOther, 0.10),
            ]),
            without_foreign: BTreeMap::from([
                (InvestorType::PensionInsurance, 0.34),
                (InvestorType::MutualFund, 0.24),
                (InvestorType::PortfolioManager, 0.19),
                (InvestorType::Proprietary, 0.09),
                (InvestorType::ForeignOther, 0.14),
            ]),
        }
    }
}

/// Sentiment quintile, most bearish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quintile {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
}

impl Quintile {
    pub const ALL: [Self; 5] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4, Self::Q5];

    /// Zero-based bucket index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Q1 => 0,
            Self::Q2 => 1,
            Self::Q3 => 2,
            Self::Q4 => 3,
            Self::Q5 => 4,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Q1 => "strong selling",
            Self::Q2 => "moderate selling",
            Self::Q3 => "neutral",
            Self::Q4 => "moderate buying",
            Self::Q5 => "strong buying",
        }
    }
}

impl fmt::Display for Quintile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.index() + 1)
    }
}

/// Historical outcome observed for one quintile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuintileBucket {
    /// Average forward return in percent
    pub avg_return_pct: f64,
    /// Share of positive forward returns in percent
    pub win_rate_pct: f64,
}

/// Quintile breakpoints and their historical outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuintileTable {
    /// Exclusive upper bounds of Q1..Q4; Q5 holds everything above
    pub breakpoints: [f64; 4],
    /// Outcome per quintile, Q1 first
    pub buckets: [QuintileBucket; 5],
}

impl QuintileTable {
    /// Maps a composite sentiment value to its quintile.
    #[must_use]
    pub fn classify(&self, sentiment: f64) -> Quintile {
        self.breakpoints
            .iter()
            .position(|&upper| sentiment < upper)
            .map_or(Quintile::Q5, |i| Quintile::ALL[i])
    }

    /// Historical outcome of a quintile.
    #[must_use]
    pub fn bucket(&self, quintile: Quintile) -> &QuintileBucket {
        &self.buckets[quintile.index()]
    }

    fn validate(&self) -> Result<()> {
        if self.breakpoints.iter().any(|b| !b.is_finite()) {
            return Err(EngineError::config("quintile breakpoints must be finite"));
        }
        if self.breakpoints.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EngineError::config(format!(
                "quintile breakpoints must be strictly increasing, got {:?}",
                self.breakpoints
            )));
        }
        if self
            .buckets
            .iter()
            .any(|b| !(0.0..=100.0).contains(&b.win_rate_pct))
        {
            return Err(EngineError::config("quintile win rates must be in [0, 100]"));
        }
        Ok(())
    }
}

impl Default for QuintileTable {
    fn default() -> Self {
        Self {
            breakpoints: [-0.5, -0.15, 0.15, 0.5],
            buckets: [
                QuintileBucket {
                    avg_return_pct: -1.85,
                    win_rate_pct: 38.2,
                },
                QuintileBucket {
                    avg_return_pct: -0.62,
                    win_rate_pct: 44.7,
                },
                QuintileBucket {
                    avg_return_pct: 0.08,
                    win_rate_pct: 50.3,
                },
                QuintileBucket {
                    avg_return_pct: 0.71,
                    win_rate_pct: 55.6,
                },
                QuintileBucket {
                    avg_return_pct: 1.64,
                    win_rate_pct: 61.4,
                },
            ],
        }
    }
}

/// Every static table the scorer depends on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTables {
    pub catalog: InvestorCatalog,
    pub weights: WeightTable,
    pub quintiles: QuintileTable,
}

impl ScoringTables {
    /// Checks the tables for internal consistency.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for non-finite catalog quality, negative
    /// weights, unordered breakpoints or win rates outside [0, 100].
    pub fn validate(&self) -> Result<()> {
        if let Some((t, p)) = self.catalog.iter().find(|(_, p)| !p.quality.is_finite()) {
            return Err(EngineError::config(format!(
                "catalog: quality for {} must be finite, got {}",
                t.code(),
                p.quality
            )));
        }
        self.weights.validate()?;
        self.quintiles.validate()
    }
}
