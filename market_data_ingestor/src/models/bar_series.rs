//! A collection of time-series bars for a specific symbol and timeframe.

use serde::Serialize;

use crate::models::{bar::Bar, timeframe::TimeFrame};

/// Represents a complete set of time-series data for a single symbol.
///
/// Groups a vector of [`Bar`]s with their symbol and [`TimeFrame`], making
/// the data set self-describing. Bars are ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "HPG.VN", "AAPL").
    pub symbol: String,
    /// The time interval for each bar in the series.
    pub timeframe: TimeFrame,
    /// Currency the prices are quoted in, when the provider reports it.
    pub currency: Option<String>,
    /// The collection of OHLCV bars.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Whether the provider returned no bars for the symbol.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
