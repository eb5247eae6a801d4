use serde::{Deserialize, Serialize};
use smart_money_core::{Quintile, QuintileTable, Sentiment};

/// Historical expectation for the bucket a composite falls in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuintileEstimate {
    pub quintile: Quintile,
    pub sentiment: f64,
    pub expected_return_pct: f64,
    pub win_rate_pct: f64,
    pub description: String,
}

/// Looks up the bucket estimate; `None` when the composite is absent.
#[must_use]
pub fn quintile_estimate(composite: Sentiment, table: &QuintileTable) -> Option<QuintileEstimate> {
    let sentiment = composite.value()?;
    let quintile = table.classify(sentiment);
    let bucket = table.bucket(quintile);
    Some(QuintileEstimate {
        quintile,
        sentiment,
        expected_return_pct: bucket.avg_return_pct,
        win_rate_pct: bucket.win_rate_pct,
        description: quintile.description().to_string(),
    })
}
