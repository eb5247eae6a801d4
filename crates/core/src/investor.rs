//! Investor-type categories and their backtested quality profile.
//!
//! Every raw volume record belongs to exactly one investor category. The
//! categories are a closed set, so adding or removing one is a compile-time
//! checked change rather than a new string key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Institutional investor category.
///
/// Declaration order is catalog order (strongest predictor first) and drives
/// `Ord`, which in turn fixes iteration order in every per-type map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvestorType {
    /// Foreign institutional investors
    #[serde(rename = "F")]
    Foreign,
    /// Pension funds and insurance companies
    #[serde(rename = "P")]
    PensionInsurance,
    /// Mutual funds
    #[serde(rename = "M")]
    MutualFund,
    /// Discretionary portfolio managers
    #[serde(rename = "G")]
    PortfolioManager,
    /// Proprietary trading desks
    #[serde(rename = "D")]
    Proprietary,
    /// Foreign accounts outside the institutional category
    #[serde(rename = "O")]
    ForeignOther,
}

impl InvestorType {
    /// All categories in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Foreign,
        Self::PensionInsurance,
        Self::MutualFund,
        Self::PortfolioManager,
        Self::Proprietary,
        Self::ForeignOther,
    ];

    /// Parses a single-letter type code (case-insensitive, surrounding
    /// whitespace ignored).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "F" => Some(Self::Foreign),
            "P" => Some(Self::PensionInsurance),
            "M" => Some(Self::MutualFund),
            "G" => Some(Self::PortfolioManager),
            "D" => Some(Self::Proprietary),
            "O" => Some(Self::ForeignOther),
            _ => None,
        }
    }

    /// Single-letter code used in raw data.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Foreign => 'F',
            Self::PensionInsurance => 'P',
            Self::MutualFund => 'M',
            Self::PortfolioManager => 'G',
            Self::Proprietary => 'D',
            Self::ForeignOther => 'O',
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Foreign => "Foreign Investors",
            Self::PensionInsurance => "Pension & Insurance",
            Self::MutualFund => "Mutual Funds",
            Self::PortfolioManager => "Portfolio Managers",
            Self::Proprietary => "Proprietary Desks",
            Self::ForeignOther => "Foreign Other",
        }
    }

    /// Short label for compact displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Foreign => "Foreign",
            Self::PensionInsurance => "Pension",
            Self::MutualFund => "Funds",
            Self::PortfolioManager => "PM",
            Self::Proprietary => "Prop",
            Self::ForeignOther => "For-Other",
        }
    }
}

impl fmt::Display for InvestorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predictive-quality tier from historical backtesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Strong,
    Moderate,
    Weak,
}

impl QualityTier {
    /// Returns a short description of the tier.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Strong => "strong predictor",
            Self::Moderate => "moderate predictor",
            Self::Weak => "weak predictor",
        }
    }
}

/// Backtested profile of one investor category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeProfile {
    /// Predictive-quality coefficient (rank correlation with forward returns)
    pub quality: f64,
    /// Quality tier
    pub tier: QualityTier,
}

impl TypeProfile {
    #[must_use]
    pub const fn new(quality: f64, tier: QualityTier) -> Self {
        Self { quality, tier }
    }
}

/// Immutable catalog of investor categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestorCatalog {
    /// Profile per investor category
    pub profiles: BTreeMap<InvestorType, TypeProfile>,
    /// The category treated as the highest-quality foreign-flow signal
    pub foreign_flow: InvestorType,
}

impl InvestorCatalog {
    /// Returns the profile for a category, if catalogued.
    #[must_use]
    pub fn profile(&self, investor_type: InvestorType) -> Option<&TypeProfile> {
        self.profiles.get(&investor_type)
    }

    /// Returns the foreign-flow category.
    #[must_use]
    pub const fn foreign_flow(&self) -> InvestorType {
        self.foreign_flow
    }

    /// Iterates catalogued categories in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (InvestorType, &TypeProfile)> {
        self.profiles.iter().map(|(t, p)| (*t, p))
    }
}

impl Default for InvestorCatalog {
    fn default() -> Self {
        let profiles = BTreeMap::from([
            (InvestorType::Foreign, TypeProfile::new(0.142, QualityTier::Strong)),
            (InvestorType::PensionInsurance, TypeProfile::new(0.097, QualityTier::Strong)),
            (InvestorType::MutualFund, TypeProfile::new(0.068, QualityTier::Moderate)),
            (InvestorType::PortfolioManager, TypeProfile::new(0.055, QualityTier::Moderate)),
            (InvestorType::Proprietary, TypeProfile::new(0.021, QualityTier::Weak)),
            (InvestorType::ForeignOther, TypeProfile::new(0.018, QualityTier::Weak)),
        ]);

        Self {
            profiles,
            foreign_flow: InvestorType::Foreign,
        }
    }
}
