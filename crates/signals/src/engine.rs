//! Engine facade over one immutable data snapshot.

use crate::decision::{DecisionEngine, TrafficLight};
use crate::index::SentimentIndex;
use crate::outcome::{HistoricalOutcomeIndex, OutcomeStatistics};
use crate::pattern::{PatternDetector, PatternResult};
use crate::scorer::{SignalScore, SignalScorer};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smart_money_core::{EngineConfig, ForwardReturns, Result, SecurityInfo, SentimentRecord};
use std::collections::BTreeMap;

/// Everything the engine knows about one security on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityReport {
    pub security_id: String,
    pub date: NaiveDate,
    /// Reference data when supplied
    pub info: Option<SecurityInfo>,
    pub sentiment: SentimentRecord,
    pub pattern: PatternResult,
    pub score: SignalScore,
    /// `None` when the composite is absent
    pub outcomes: Option<OutcomeStatistics>,
    pub buy_light: TrafficLight,
    pub sell_light: TrafficLight,
}

impl SecurityReport {
    /// Display name: symbol when known, else the security id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.info
            .as_ref()
            .map_or(self.security_id.as_str(), |i| i.symbol.as_str())
    }
}

/// Read-only analysis engine.
///
/// Built once from a sentiment index, a forward-return source and a
/// validated configuration. Every query is a pure read.
pub struct SmartMoneyEngine<P: ForwardReturns> {
    index: SentimentIndex,
    prices: P,
    config: EngineConfig,
    securities: BTreeMap<String, SecurityInfo>,
    detector: PatternDetector,
    scorer: SignalScorer,
    decision: DecisionEngine,
}

impl<P: ForwardReturns> SmartMoneyEngine<P> {
    /// Creates an engine over a snapshot.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(index: SentimentIndex, prices: P, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let detector = PatternDetector::new(config.pattern.clone());
        let scorer = SignalScorer::new(
            config.tables.clone(),
            config.scoring.clone(),
            config.alert.clone(),
        );
        let decision = DecisionEngine::new(config.decision.clone());

        tracing::info!(
            records = index.len(),
            securities = index.securities().len(),
            "smart-money engine ready"
        );

        Ok(Self {
            index,
            prices,
            config,
            securities: BTreeMap::new(),
            detector,
            scorer,
            decision,
        })
    }

    /// Attaches display reference data.
    #[must_use]
    pub fn with_securities(mut self, securities: impl IntoIterator<Item = SecurityInfo>) -> Self {
        self.securities
            .extend(securities.into_iter().map(|s| (s.security_id.clone(), s)));
        self
    }

    #[must_use]
    pub fn index(&self) -> &SentimentIndex {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn security_info(&self, security_id: &str) -> Option<&SecurityInfo> {
        self.securities.get(security_id)
    }

    /// Sentiment for a security and date; an empty record with an absent
    /// composite when there is no data.
    #[must_use]
    pub fn get_sentiment(&self, security_id: &str, date: NaiveDate) -> SentimentRecord {
        self.index.get(security_id, date).cloned().unwrap_or_else(|| {
            tracing::debug!(security_id, %date, "no sentiment data");
            SentimentRecord::empty(security_id, date)
        })
    }

    /// # Errors
    /// Returns `InvalidWindow` if `window_size` is zero.
    pub fn detect_pattern(
        &self,
        security_id: &str,
        reference_date: NaiveDate,
        window_size: usize,
    ) -> Result<PatternResult> {
        self.detector
            .detect(&self.index, security_id, reference_date, window_size)
    }

    /// Historical outcomes using the configured tolerance.
    ///
    /// # Errors
    /// Returns `InvalidHorizon`, `InvalidSentiment` or `InvalidTolerance`.
    pub fn get_outcomes(
        &self,
        security_id: &str,
        sentiment_value: f64,
        horizon_days: usize,
    ) -> Result<OutcomeStatistics> {
        HistoricalOutcomeIndex::new(&self.index, &self.prices, self.config.outcomes.tolerance)?
            .outcomes(security_id, sentiment_value, horizon_days)
    }

    /// Scores a record, pulling its trend history from the index.
    #[must_use]
    pub fn score_signal(&self, record: &SentimentRecord, pattern: &PatternResult) -> SignalScore {
        let history = self.index.preceding(
            &record.security_id,
            record.date,
            self.config.scoring.trend_lookback_days,
        );
        self.scorer.score(record, &history, pattern)
    }

    #[must_use]
    pub fn decide(&self, is_buy: bool, raw: Option<f64>, weighted: Option<f64>) -> TrafficLight {
        self.decision.decide(is_buy, raw, weighted)
    }

    /// Runs the full pipeline for one security with the configured window
    /// and horizon.
    ///
    /// # Errors
    /// Propagates pattern and outcome errors; with a validated config these
    /// do not occur.
    pub fn analyze(&self, security_id: &str, date: NaiveDate) -> Result<SecurityReport> {
        let sentiment = self.get_sentiment(security_id, date);
        let pattern = self.detect_pattern(security_id, date, self.config.pattern.window_size)?;
        let score = self.score_signal(&sentiment, &pattern);

        let outcomes = sentiment
            .composite
            .value()
            .map(|v| self.get_outcomes(security_id, v, self.config.outcomes.horizon_days))
            .transpose()?;

        let raw = sentiment.composite.value();
        let weighted = score.weighted.value.value();

        Ok(SecurityReport {
            security_id: security_id.to_string(),
            date,
            info: self.security_info(security_id).cloned(),
            buy_light: self.decide(true, raw, weighted),
            sell_light: self.decide(false, raw, weighted),
            sentiment,
            pattern,
            score,
            outcomes,
        })
    }

    /// Analyzes every security with a record on `date`, most urgent first.
    ///
    /// Ordered by alert severity, then pattern-strength score, then
    /// security id.
    ///
    /// # Errors
    /// Propagates the first analysis error.
    pub fn alerts_on(&self, date: NaiveDate) -> Result<Vec<SecurityReport>> {
        let mut reports = self
            .index
            .records_on(date)
            .into_iter()
            .map(|r| self.analyze(&r.security_id, date))
            .collect::<Result<Vec<_>>>()?;

        reports.sort_by(|a, b| {
            b.score
                .alert
                .level
                .severity()
                .cmp(&a.score.alert.level.severity())
                .then_with(|| b.score.pattern_strength.score.cmp(&a.score.pattern_strength.score))
                .then_with(|| a.security_id.cmp(&b.security_id))
        });

        tracing::info!(%date, securities = reports.len(), "portfolio alert scan complete");
        Ok(reports)
    }
}
