//! Plain-text rendering of engine output.

use crate::engine::SecurityReport;
use crate::scorer::AlertLevel;
use smart_money_core::InvestorType;

fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:+.2}%"))
}

impl SecurityReport {
    /// Renders the report as a multi-section text block.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "=== Smart Money Report: {} ({}) ===\n",
            self.display_name(),
            self.date
        ));
        if let Some(info) = &self.info {
            output.push_str(&format!("{} [{}]\n", info.company_name, info.security_id));
        }
        output.push('\n');

        // Sentiment
        output.push_str("--- Sentiment ---\n");
        output.push_str(&format!("Composite: {}\n", self.sentiment.composite));
        output.push_str(&format!("Weighted:  {}\n", self.score.weighted.value));
        output.push_str(&format!(
            "Volume:    buy {:.0} / sell {:.0}\n",
            self.sentiment.total_buy_volume, self.sentiment.total_sell_volume
        ));
        for t in InvestorType::ALL {
            output.push_str(&format!(
                "  {:<10} {:>7}\n",
                t.label(),
                self.sentiment.sentiment_of(t).to_string()
            ));
        }
        if let Some(top) = &self.score.weighted.strongest {
            output.push_str(&format!(
                "Strongest predictor: {} ({:+.3})",
                top.investor_type, top.contribution
            ));
            if let Some(profile) = &top.profile {
                output.push_str(&format!(
                    " - {}, quality {:.3}",
                    profile.tier.description(),
                    profile.quality
                ));
            }
            output.push('\n');
        }
        output.push('\n');

        // Scoring
        output.push_str("--- Signal ---\n");
        let consensus = &self.score.consensus;
        output.push_str(&format!(
            "Consensus: {} {} ({} bullish / {} bearish / {} neutral)\n",
            consensus.level.label(),
            consensus.direction,
            consensus.bullish,
            consensus.bearish,
            consensus.neutral
        ));
        output.push_str(&format!("Trend:     {}", self.score.trend.direction));
        if let Some(delta) = self.score.trend.delta {
            output.push_str(&format!(" ({delta:+.3} vs baseline)"));
        }
        output.push('\n');
        if let Some(q) = &self.score.quintile {
            output.push_str(&format!(
                "Quintile:  {} {} (avg return {:+.2}%, win rate {:.1}%)\n",
                q.quintile, q.description, q.expected_return_pct, q.win_rate_pct
            ));
        }
        output.push('\n');

        // Pattern
        output.push_str("--- Pattern ---\n");
        output.push_str(&format!(
            "Sell streak: {} days, buy streak: {} days\n",
            self.pattern.consecutive_sell_days, self.pattern.consecutive_buy_days
        ));
        output.push_str(&format!(
            "Volume spike: {}\n",
            if self.pattern.has_volume_spike { "Yes" } else { "No" }
        ));
        let strength = &self.score.pattern_strength;
        output.push_str(&format!(
            "Strength: {}/100 ({})\n",
            strength.score,
            strength.level.label()
        ));
        for factor in &strength.factors {
            output.push_str(&format!("  - {factor}\n"));
        }
        output.push('\n');

        // Outcomes
        if let Some(stats) = &self.outcomes {
            output.push_str(&format!(
                "--- Historical Outcomes ({}d, ±{:.2}) ---\n",
                stats.horizon_days, stats.tolerance
            ));
            if stats.has_data() {
                output.push_str(&format!("Similar days: {}\n", stats.total_patterns));
                output.push_str(&format!(
                    "Decline rate: {}\n",
                    stats.decline_rate_pct.map_or("n/a".to_string(), |v| format!("{v:.1}%"))
                ));
                output.push_str(&format!("Avg change:   {}\n", pct(stats.avg_change_pct)));
            } else {
                output.push_str("No historical data\n");
            }
            output.push('\n');
        }

        // Alert
        output.push_str(&format!("ALERT: {}\n", self.score.alert.level));
        output.push_str(&format!("Reason: {}\n", self.score.alert.reason));
        output.push_str(&format!("Action: {}\n", self.score.alert.action));
        output.push_str(&format!(
            "Buy:  {} - {}\n",
            self.buy_light.label, self.buy_light.message
        ));
        output.push_str(&format!(
            "Sell: {} - {}\n",
            self.sell_light.label, self.sell_light.message
        ));

        output
    }
}

/// One line per report: level, name, composite, strength, reason.
#[must_use]
pub fn alert_table(reports: &[SecurityReport], include_clear: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<12} {:>9} {:>8}  {}\n",
        "LEVEL", "SECURITY", "COMPOSITE", "STRENGTH", "REASON"
    ));

    let rows = reports
        .iter()
        .filter(|r| include_clear || r.score.alert.level != AlertLevel::Clear);
    for r in rows {
        output.push_str(&format!(
            "{:<8} {:<12} {:>9} {:>8}  {}\n",
            r.score.alert.level.as_str(),
            r.display_name(),
            r.sentiment.composite.to_string(),
            r.score.pattern_strength.score,
            r.score.alert.reason
        ));
    }
    output
}
