//! End-to-end scenarios for the smart-money engine.
//!
//! Each test starts from raw volume records and goes through aggregation,
//! pattern detection, scoring and the traffic light:
//! - Single-date composite from mixed investor types
//! - Three-day selling streak with a volume spike
//! - Buying into heavy selling
//! - Securities with no data at all
//! - Weighted composite bounds and alert totality over a generated grid

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use smart_money_core::{
    EngineConfig, InvestorType, PriceHistory, PricePoint, RawVolumeRecord, Sentiment,
    TradeSide,
};
use smart_money_signals::{
    aggregate, AlertLevel, LightColor, PatternResult, Recommendation, SentimentIndex,
    SignalScorer, SmartMoneyEngine,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn buy(sec: &str, d: u32, t: InvestorType, volume: f64) -> RawVolumeRecord {
    RawVolumeRecord::new(sec, day(d), t, TradeSide::Buy, volume)
}

fn sell(sec: &str, d: u32, t: InvestorType, volume: f64) -> RawVolumeRecord {
    RawVolumeRecord::new(sec, day(d), t, TradeSide::Sell, volume)
}

/// Three trading days of foreign selling ending in a volume spike.
fn selling_streak_records() -> Vec<RawVolumeRecord> {
    vec![
        buy("TEVA", 4, InvestorType::Foreign, 30.0),
        sell("TEVA", 4, InvestorType::Foreign, 70.0),
        buy("TEVA", 5, InvestorType::Foreign, 20.0),
        buy("TEVA", 5, InvestorType::PensionInsurance, 12.5),
        sell("TEVA", 5, InvestorType::Foreign, 67.5),
        buy("TEVA", 6, InvestorType::Foreign, 60.0),
        sell("TEVA", 6, InvestorType::Foreign, 200.0),
        sell("TEVA", 6, InvestorType::MutualFund, 40.0),
    ]
}

fn engine_over(records: &[RawVolumeRecord]) -> SmartMoneyEngine<PriceHistory> {
    let prices = PriceHistory::from_points([
        ("TEVA", PricePoint { date: day(4), close: dec!(41.20) }),
        ("TEVA", PricePoint { date: day(5), close: dec!(40.10) }),
        ("TEVA", PricePoint { date: day(6), close: dec!(38.90) }),
        ("TEVA", PricePoint { date: day(7), close: dec!(38.00) }),
    ]);
    SmartMoneyEngine::new(aggregate(records), prices, EngineConfig::default()).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn mixed_types_on_one_date() {
    let records = vec![
        buy("LUMI", 1, InvestorType::Foreign, 100.0),
        sell("LUMI", 1, InvestorType::MutualFund, 50.0),
    ];
    let engine = engine_over(&records);
    let record = engine.get_sentiment("LUMI", day(1));

    assert_eq!(record.sentiment_of(InvestorType::Foreign), Sentiment::Present(1.0));
    assert_eq!(record.sentiment_of(InvestorType::MutualFund), Sentiment::Present(-1.0));
    assert!((record.composite.value().unwrap() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn three_day_selling_streak_with_spike() {
    let engine = engine_over(&selling_streak_records());

    let composites: Vec<f64> = (4..=6)
        .map(|d| engine.get_sentiment("TEVA", day(d)).composite.value().unwrap())
        .collect();
    assert!((composites[0] + 0.4).abs() < 1e-12);
    assert!((composites[1] + 0.35).abs() < 1e-12);
    assert!((composites[2] + 0.6).abs() < 1e-12);

    let pattern = engine.detect_pattern("TEVA", day(6), 5).unwrap();
    assert_eq!(pattern.consecutive_sell_days, 3);
    assert!(pattern.has_volume_spike);
    assert!(pattern.flagged);
    assert!((pattern.latest_volume - 300.0).abs() < f64::EPSILON);
    assert!((pattern.avg_volume - 100.0).abs() < f64::EPSILON);

    let report = engine.analyze("TEVA", day(6)).unwrap();
    assert_eq!(report.score.alert.level, AlertLevel::High);
    assert_eq!(report.score.pattern_strength.score, 80);
    assert_eq!(report.buy_light.color, LightColor::Red);
    assert_eq!(report.sell_light.color, LightColor::Green);
}

#[test]
fn buying_into_heavy_selling_is_red() {
    let engine = engine_over(&[]);
    let light = engine.decide(true, Some(-0.6), Some(-0.55));

    assert_eq!(light.color, LightColor::Red);
    assert_eq!(light.recommendation, Recommendation::Reconsider);
}

#[test]
fn no_volume_means_no_data() {
    let engine = engine_over(&selling_streak_records());
    let record = engine.get_sentiment("NICE", day(6));

    assert!(record.composite.is_absent());
    assert!(record.type_sentiment.values().all(|s| s.is_absent()));

    let light = engine.decide(true, record.composite.value(), None);
    assert_eq!(light.color, LightColor::Gray);
    assert_eq!(light.label, "No Data");
}

#[test]
fn historical_outcomes_follow_similar_days() {
    let engine = engine_over(&selling_streak_records());

    // -0.4 and -0.35 fall in the band around -0.4
    let stats = engine.get_outcomes("TEVA", -0.4, 1).unwrap();
    assert_eq!(stats.total_patterns, 2);
    assert_eq!(stats.declines, 2);
    assert!((stats.decline_rate_pct.unwrap() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn shuffled_input_gives_identical_index() {
    let records = selling_streak_records();
    let mut shuffled = records.clone();
    shuffled.swap(0, 7);
    shuffled.swap(2, 5);
    shuffled.reverse();

    assert_eq!(aggregate(&records), aggregate(&shuffled));
}

// =============================================================================
// Properties
// =============================================================================

/// Records where every investor type traded, with varied imbalances.
fn all_types_index() -> SentimentIndex {
    let mut records = Vec::new();
    for d in 1..=20u32 {
        for (i, t) in InvestorType::ALL.iter().enumerate() {
            let seed = f64::from(d * 7 + i as u32 * 13);
            records.push(buy("ELAL", d, *t, 1.0 + seed % 17.0));
            records.push(sell("ELAL", d, *t, 1.0 + (seed * 3.0) % 23.0));
        }
    }
    aggregate(&records)
}

#[test]
fn weighted_composite_is_convex_combination() {
    let index = all_types_index();
    let scorer = SignalScorer::default();

    for record in index.iter() {
        let values: Vec<f64> = record.present_types().map(|(_, s)| s).collect();
        assert_eq!(values.len(), InvestorType::ALL.len());
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let pattern = PatternResult::empty(record.security_id.clone(), record.date, 5);
        let weighted = scorer.score(record, &[], &pattern).weighted.value.value().unwrap();
        assert!(weighted >= min - 1e-12 && weighted <= max + 1e-12);
    }
}

#[test]
fn composite_is_bounded_or_absent() {
    let index = all_types_index();
    for record in index.iter() {
        let v = record.composite.value().unwrap();
        assert!((-1.0..=1.0).contains(&v));
    }
}

#[test]
fn every_date_gets_exactly_one_alert_level() {
    let engine =
        SmartMoneyEngine::new(all_types_index(), PriceHistory::new(), EngineConfig::default())
            .unwrap();

    for d in 1..=20 {
        let reports = engine.alerts_on(day(d)).unwrap();
        assert_eq!(reports.len(), 1);
        let level = reports[0].score.alert.level;
        assert!(matches!(
            level,
            AlertLevel::High | AlertLevel::Medium | AlertLevel::Bullish | AlertLevel::Clear
        ));
    }
}

#[test]
fn report_serializes_to_json() {
    let engine = engine_over(&selling_streak_records());
    let report = engine.analyze("TEVA", day(6)).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["score"]["alert"]["level"], "HIGH");
    assert_eq!(json["buy_light"]["color"], "red");
    assert!(json["sentiment"]["type_sentiment"]["O"].is_null());
}
