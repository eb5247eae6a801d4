//! Trade-specific traffic light.
//!
//! Answers "should I go ahead with this buy/sell?" from the intended
//! direction and the scored sentiment. Uses its own threshold; the alert
//! thresholds answer a different question.

use serde::{Deserialize, Serialize};
use smart_money_core::DecisionConfig;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightColor {
    Green,
    Yellow,
    Red,
    /// No sentiment data; not part of the three-colour scale
    Gray,
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Gray => "gray",
        };
        f.write_str(s)
    }
}

/// How the intended action relates to smart-money direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Aligned,
    Mixed,
    Opposed,
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Proceed,
    Caution,
    Reconsider,
    NoData,
}

impl Recommendation {
    /// Returns the display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Proceed => "Proceed",
            Self::Caution => "Caution",
            Self::Reconsider => "Reconsider",
            Self::NoData => "No Data",
        }
    }
}

/// Intended trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    #[must_use]
    pub const fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Self::Buy
        } else {
            Self::Sell
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Buy => "buying",
            Self::Sell => "selling",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub action: TradeAction,
    pub color: LightColor,
    pub label: String,
    pub recommendation: Recommendation,
    pub alignment: Alignment,
    /// Sentiment that drove the decision
    pub sentiment_used: Option<f64>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    #[must_use]
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Maps an intended action and the available sentiment to a light.
    ///
    /// The weighted sentiment drives the decision when present; otherwise
    /// the raw composite is used. Non-finite inputs count as absent.
    #[must_use]
    pub fn decide(&self, is_buy: bool, raw: Option<f64>, weighted: Option<f64>) -> TrafficLight {
        let action = TradeAction::from_is_buy(is_buy);
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

        let Some(sentiment) = finite(weighted).or(finite(raw)) else {
            return TrafficLight {
                action,
                color: LightColor::Gray,
                label: Recommendation::NoData.label().to_string(),
                recommendation: Recommendation::NoData,
                alignment: Alignment::NoData,
                sentiment_used: None,
                message: "No smart-money data available for this security and date".to_string(),
            };
        };

        let t = self.config.threshold;
        let bullish = sentiment > t;
        let bearish = sentiment < -t;

        let alignment = match action {
            TradeAction::Buy if bullish => Alignment::Aligned,
            TradeAction::Buy if bearish => Alignment::Opposed,
            TradeAction::Sell if bearish => Alignment::Aligned,
            TradeAction::Sell if bullish => Alignment::Opposed,
            _ => Alignment::Mixed,
        };

        let verb = action.verb();
        let (color, recommendation, message) = match alignment {
            Alignment::Aligned => (
                LightColor::Green,
                Recommendation::Proceed,
                format!("Smart money supports {verb} (sentiment {sentiment:+.3})"),
            ),
            Alignment::Opposed => (
                LightColor::Red,
                Recommendation::Reconsider,
                format!("Smart money is moving against {verb} (sentiment {sentiment:+.3})"),
            ),
            _ => (
                LightColor::Yellow,
                Recommendation::Caution,
                format!("Smart money shows no clear direction (sentiment {sentiment:+.3})"),
            ),
        };

        TrafficLight {
            action,
            color,
            label: recommendation.label().to_string(),
            recommendation,
            alignment,
            sentiment_used: Some(sentiment),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DecisionEngine {
        DecisionEngine::default()
    }

    #[test]
    fn buying_into_heavy_selling_is_red() {
        let light = engine().decide(true, Some(-0.6), Some(-0.55));
        assert_eq!(light.color, LightColor::Red);
        assert_eq!(light.alignment, Alignment::Opposed);
        assert_eq!(light.recommendation, Recommendation::Reconsider);
        assert_eq!(light.sentiment_used, Some(-0.55));
    }

    #[test]
    fn selling_with_smart_money_is_green() {
        let light = engine().decide(false, None, Some(-0.4));
        assert_eq!(light.color, LightColor::Green);
        assert_eq!(light.label, "Proceed");
    }

    #[test]
    fn inside_threshold_is_yellow() {
        let light = engine().decide(true, Some(0.3), None);
        assert_eq!(light.color, LightColor::Yellow);
        assert_eq!(light.alignment, Alignment::Mixed);
        assert_eq!(light.label, "Caution");
    }

    #[test]
    fn weighted_takes_precedence_over_raw() {
        let light = engine().decide(true, Some(0.8), Some(-0.5));
        assert_eq!(light.color, LightColor::Red);
    }

    #[test]
    fn falls_back_to_raw() {
        let light = engine().decide(false, Some(0.5), None);
        assert_eq!(light.color, LightColor::Red);
        assert_eq!(light.sentiment_used, Some(0.5));
    }

    #[test]
    fn no_data_is_gray() {
        let light = engine().decide(true, None, None);
        assert_eq!(light.color, LightColor::Gray);
        assert_eq!(light.label, "No Data");
        assert_eq!(light.recommendation, Recommendation::NoData);
        assert!(light.sentiment_used.is_none());
    }

    #[test]
    fn nan_counts_as_absent() {
        let light = engine().decide(true, None, Some(f64::NAN));
        assert_eq!(light.color, LightColor::Gray);
    }

    #[test]
    fn threshold_is_configurable() {
        let engine = DecisionEngine::new(DecisionConfig { threshold: 0.1 });
        assert_eq!(engine.decide(true, Some(0.2), None).color, LightColor::Green);
    }
}
