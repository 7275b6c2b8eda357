//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is the standard output of every [`DataProvider`](crate::providers::DataProvider)
//! implementation, regardless of the vendor it came from.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single time-series bar (OHLCV) for a given timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// The timestamp for this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price, as traded (not adjusted for splits or dividends).
    pub close: f64,

    /// Close adjusted for corporate actions. Not all providers supply this.
    pub adj_close: Option<f64>,

    /// Volume traded during the bar interval.
    pub volume: f64,
}

impl Bar {
    /// The adjusted close when `adjusted` is set and the provider supplied
    /// one, the raw close otherwise.
    pub fn close_price(&self, adjusted: bool) -> f64 {
        match (adjusted, self.adj_close) {
            (true, Some(adj)) => adj,
            _ => self.close,
        }
    }
}
