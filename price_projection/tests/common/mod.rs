#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use price_projection::models::price_series::{PricePoint, PriceSeries};

/// Daily series starting 2025-01-02 with the given closes.
pub fn daily_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2025, 1, 2, 7, 0, 0).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            timestamp: start + Duration::days(i as i64),
            close,
        })
        .collect();
    PriceSeries::new(symbol, points).expect("valid series")
}
