//! Price history retrieval for the projection engine.
//!
//! Whatever goes wrong while downloading, the caller only ever sees
//! [`ProjectionError::InsufficientData`]; the [`DataShortfall`] cause tells
//! a failed download apart from a ticker with no trades in the window.

use chrono::{DateTime, Duration, Utc};
use market_data_ingestor::{
    models::{bar_series::BarSeries, request_params::BarsRequestParams},
    providers::DataProvider,
};
use price_projection::{
    DataShortfall, ProjectionError,
    models::price_series::{PricePoint, PriceSeries},
};
use tracing::{debug, warn};

/// Validated closes plus the quote currency reported by the provider.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    /// Daily closes, oldest first.
    pub series: PriceSeries,
    /// ISO currency code, when known.
    pub currency: Option<String>,
}

/// Downloads daily closes for `ticker` over the `lookback_days` calendar days
/// ending at `now`.
pub async fn fetch_price_series(
    provider: &dyn DataProvider,
    ticker: &str,
    lookback_days: u32,
    now: DateTime<Utc>,
    adjusted_close: bool,
) -> Result<PriceHistory, ProjectionError> {
    let start = now - Duration::days(i64::from(lookback_days));
    let request = BarsRequestParams::daily(ticker, start, now);

    let series = match provider.fetch_bars(request).await {
        Ok(series) => series,
        Err(e) => {
            warn!(ticker, error = %e, "price download failed");
            return Err(shortfall(
                ticker,
                DataShortfall::Unavailable {
                    message: e.to_string(),
                },
            ));
        }
    };

    let Some(bars) = series.into_iter().find(|s| s.symbol == ticker) else {
        return Err(shortfall(ticker, DataShortfall::NoHistory));
    };
    if bars.is_empty() {
        return Err(shortfall(ticker, DataShortfall::NoHistory));
    }

    let currency = bars.currency.clone();
    let points = to_points(&bars, adjusted_close);
    if points.is_empty() {
        return Err(shortfall(ticker, DataShortfall::NoHistory));
    }
    debug!(ticker, points = points.len(), "price history ready");

    Ok(PriceHistory {
        series: PriceSeries::new(ticker, points)?,
        currency,
    })
}

/// Keeps usable closes, oldest first, one per timestamp.
fn to_points(bars: &BarSeries, adjusted_close: bool) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = bars
        .bars
        .iter()
        .map(|bar| PricePoint {
            timestamp: bar.timestamp,
            close: bar.close_price(adjusted_close),
        })
        .filter(|p| p.close.is_finite() && p.close > 0.0)
        .collect();

    let before = points.len();
    points.sort_by_key(|p| p.timestamp);
    points.dedup_by_key(|p| p.timestamp);
    if points.len() != before {
        debug!(dropped = before - points.len(), "dropped duplicate timestamps");
    }
    points
}

fn shortfall(ticker: &str, cause: DataShortfall) -> ProjectionError {
    ProjectionError::InsufficientData {
        symbol: ticker.to_string(),
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use market_data_ingestor::models::{bar::Bar, timeframe::TimeFrame};

    fn bar(day: u32, close: f64, adj_close: Option<f64>) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 2, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adj_close,
            volume: 0.0,
        }
    }

    fn series(bars: Vec<Bar>) -> BarSeries {
        BarSeries {
            symbol: "FPT.VN".into(),
            timeframe: TimeFrame::day(),
            currency: Some("VND".into()),
            bars,
        }
    }

    #[test]
    fn unusable_closes_are_dropped() {
        let s = series(vec![
            bar(1, 100.0, None),
            bar(2, f64::NAN, None),
            bar(3, 0.0, None),
            bar(4, 104.0, None),
        ]);
        let closes: Vec<f64> = to_points(&s, false).iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![100.0, 104.0]);
    }

    #[test]
    fn points_are_sorted_and_unique() {
        let s = series(vec![
            bar(3, 3.0, None),
            bar(1, 1.0, None),
            bar(3, 3.5, None),
            bar(2, 2.0, None),
        ]);
        let points = to_points(&s, false);
        let days: Vec<u32> = points.iter().map(|p| chrono::Datelike::day(&p.timestamp)).collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn adjusted_close_is_used_when_asked() {
        let s = series(vec![bar(1, 100.0, Some(95.0)), bar(2, 110.0, None)]);
        let adjusted: Vec<f64> = to_points(&s, true).iter().map(|p| p.close).collect();
        let raw: Vec<f64> = to_points(&s, false).iter().map(|p| p.close).collect();
        assert_eq!(adjusted, vec![95.0, 110.0]);
        assert_eq!(raw, vec![100.0, 110.0]);
    }
}
