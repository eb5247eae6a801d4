//! Predictive-quality weighted composite.

use serde::{Deserialize, Serialize};
use smart_money_core::{InvestorType, ScoringTables, Sentiment, SentimentRecord, TypeProfile};

/// One type's share of the weighted composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictorContribution {
    pub investor_type: InvestorType,
    pub sentiment: f64,
    pub weight: f64,
    /// `sentiment * weight`
    pub contribution: f64,
    /// Catalog profile of the type, if catalogued
    pub profile: Option<TypeProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSentiment {
    pub value: Sentiment,
    /// Whether the foreign-flow weight map was used
    pub foreign_present: bool,
    /// Contribution with the largest magnitude
    pub strongest: Option<PredictorContribution>,
    /// Every present type with positive weight, in catalog order
    pub contributions: Vec<PredictorContribution>,
}

/// Computes `Σ(s × w) / Σw` over types with present sentiment.
///
/// Types without a positive weight are left out, so the result is a convex
/// combination of the included sentiments.
#[must_use]
pub fn weighted_sentiment(record: &SentimentRecord, tables: &ScoringTables) -> WeightedSentiment {
    let foreign_present = record
        .sentiment_of(tables.catalog.foreign_flow())
        .is_present();
    let weights = tables.weights.weights(foreign_present);

    let contributions: Vec<PredictorContribution> = record
        .present_types()
        .filter_map(|(investor_type, sentiment)| {
            let weight = weights.get(&investor_type).copied().unwrap_or(0.0);
            (weight > 0.0).then_some(PredictorContribution {
                investor_type,
                sentiment,
                weight,
                contribution: sentiment * weight,
                profile: tables.catalog.profile(investor_type).copied(),
            })
        })
        .collect();

    let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
    let value = if total_weight > 0.0 {
        let weighted: f64 = contributions.iter().map(|c| c.contribution).sum();
        Sentiment::Present((weighted / total_weight).clamp(-1.0, 1.0))
    } else {
        Sentiment::Absent
    };

    // Strict comparison keeps the earliest type on ties
    let strongest = contributions.iter().fold(None, |best: Option<PredictorContribution>, c| {
        match best {
            Some(b) if b.contribution.abs() >= c.contribution.abs() => Some(b),
            _ => Some(*c),
        }
    });

    tracing::trace!(
        security_id = %record.security_id,
        date = %record.date,
        foreign_present,
        weighted = %value,
        "weighted sentiment"
    );

    WeightedSentiment {
        value,
        foreign_present,
        strongest,
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use smart_money_core::{QualityTier, TypeVolume};
    use std::collections::BTreeMap;

    fn record(volumes: &[(InvestorType, f64, f64)]) -> SentimentRecord {
        let per_type: BTreeMap<_, _> = volumes
            .iter()
            .map(|(t, b, s)| (*t, TypeVolume::new(*b, *s)))
            .collect();
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        SentimentRecord::from_volumes("IL01", date, per_type)
    }

    #[test]
    fn uses_foreign_weights_when_foreign_present() {
        // F +1.0 (w .35), M -1.0 (w .15)
        let r = record(&[
            (InvestorType::Foreign, 100.0, 0.0),
            (InvestorType::MutualFund, 0.0, 50.0),
        ]);
        let w = weighted_sentiment(&r, &ScoringTables::default());

        assert!(w.foreign_present);
        assert!((w.value.value().unwrap() - 0.2 / 0.5).abs() < 1e-12);
        assert_eq!(w.strongest.unwrap().investor_type, InvestorType::Foreign);
        assert_eq!(w.contributions.len(), 2);
        let tiers: Vec<_> = w.contributions.iter().map(|c| c.profile.map(|p| p.tier)).collect();
        assert_eq!(tiers, vec![Some(QualityTier::Strong), Some(QualityTier::Moderate)]);
    }

    #[test]
    fn switches_map_without_foreign() {
        // P +0.5 (w .34), D -1.0 (w .09)
        let r = record(&[
            (InvestorType::PensionInsurance, 75.0, 25.0),
            (InvestorType::Proprietary, 0.0, 10.0),
        ]);
        let w = weighted_sentiment(&r, &ScoringTables::default());

        assert!(!w.foreign_present);
        let expected = (0.5 * 0.34 - 0.09) / (0.34 + 0.09);
        assert!((w.value.value().unwrap() - expected).abs() < 1e-12);
        assert_eq!(w.strongest.unwrap().investor_type, InvestorType::PensionInsurance);
    }

    #[test]
    fn ties_resolved_in_catalog_order() {
        let mut tables = ScoringTables::default();
        tables.weights.without_foreign = BTreeMap::from([
            (InvestorType::MutualFund, 0.5),
            (InvestorType::PortfolioManager, 0.5),
        ]);
        let r = record(&[
            (InvestorType::PortfolioManager, 0.0, 10.0),
            (InvestorType::MutualFund, 10.0, 0.0),
        ]);
        let w = weighted_sentiment(&r, &tables);

        assert_eq!(w.strongest.unwrap().investor_type, InvestorType::MutualFund);
        assert_eq!(w.value, Sentiment::Present(0.0));
    }

    #[test]
    fn zero_weight_types_excluded() {
        let mut tables = ScoringTables::default();
        tables.weights.without_foreign = BTreeMap::from([(InvestorType::MutualFund, 1.0)]);
        let r = record(&[(InvestorType::Proprietary, 10.0, 0.0)]);
        let w = weighted_sentiment(&r, &tables);

        assert_eq!(w.value, Sentiment::Absent);
        assert!(w.strongest.is_none());
    }

    #[test]
    fn no_data_is_absent() {
        let w = weighted_sentiment(&record(&[]), &ScoringTables::default());
        assert_eq!(w.value, Sentiment::Absent);
        assert!(w.contributions.is_empty());
    }

    #[test]
    fn convex_combination_of_type_sentiments() {
        let r = record(&[
            (InvestorType::Foreign, 30.0, 70.0),
            (InvestorType::PensionInsurance, 80.0, 20.0),
            (InvestorType::MutualFund, 45.0, 55.0),
            (InvestorType::PortfolioManager, 10.0, 90.0),
            (InvestorType::Proprietary, 66.0, 34.0),
            (InvestorType::ForeignOther, 51.0, 49.0),
        ]);
        let values: Vec<f64> = r.present_types().map(|(_, s)| s).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let w = weighted_sentiment(&r, &ScoringTables::default()).value.value().unwrap();
        assert!(w >= min - 1e-12 && w <= max + 1e-12);
    }
}
