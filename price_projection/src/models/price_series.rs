//! Closing-price history for a single ticker.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::ProjectionError;

/// One observed close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    /// Bar timestamp (UTC).
    pub timestamp: DateTime<Utc>,
    /// Closing price. Always positive and finite inside a [`PriceSeries`].
    pub close: f64,
}

/// Ascending series of closes for one symbol.
///
/// Construction validates that every close is a positive finite number and
/// that timestamps are strictly increasing. The series is read-only after
/// that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series, rejecting non-positive or non-finite closes and
    /// out-of-order or duplicate timestamps.
    ///
    /// An empty series is valid here; the estimator is the one that decides
    /// how much history is enough.
    pub fn new(
        symbol: impl Into<String>,
        points: Vec<PricePoint>,
    ) -> Result<Self, ProjectionError> {
        for (i, p) in points.iter().enumerate() {
            if !p.close.is_finite() || p.close <= 0.0 {
                return Err(ProjectionError::invalid(
                    "prices",
                    format!("close at index {i} is {} (must be positive and finite)", p.close),
                ));
            }
        }
        if let Some(i) = points
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(ProjectionError::invalid(
                "prices",
                format!(
                    "timestamp at index {} ({}) does not follow {}",
                    i + 1,
                    points[i + 1].timestamp,
                    points[i].timestamp
                ),
            ));
        }

        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    /// Ticker this series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All points, oldest first.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent point, if any.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
