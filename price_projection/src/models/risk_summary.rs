//! Value-at-Risk result type.

use serde::Serialize;

/// Tail-risk figures derived from the terminal-price distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskSummary {
    /// Percentile the price was read at, in `[0, 100]` (5 by default).
    pub percentile: f64,
    /// Empirical terminal price at `percentile`.
    pub percentile_price: f64,
    /// Close the simulation started from.
    pub last_observed_price: f64,
    /// `last_observed_price - percentile_price`. Positive means downside risk.
    pub value_at_risk: f64,
}

impl RiskSummary {
    /// Builds the summary; `value_at_risk` is always the exact difference.
    pub fn new(percentile: f64, percentile_price: f64, last_observed_price: f64) -> Self {
        Self {
            percentile,
            percentile_price,
            last_observed_price,
            value_at_risk: last_observed_price - percentile_price,
        }
    }

    /// One-sided confidence level implied by the percentile, e.g. 95 for 5.
    pub fn confidence_level(&self) -> f64 {
        100.0 - self.percentile
    }
}
