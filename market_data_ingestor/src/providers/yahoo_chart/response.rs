use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::bar::Bar;

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Deserialize, Debug)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
    pub exchange_timezone_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Vec<AdjClose>,
}

/// Column-oriented OHLCV. Yahoo reports `null` for sessions without trades.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// Bars decoded from one chart result.
#[derive(Debug)]
pub struct DecodedBars {
    pub bars: Vec<Bar>,
    /// Rows skipped because the close was `null` or the timestamp invalid.
    pub dropped: usize,
}

impl ChartResult {
    /// Zips the column arrays into bars. Rows without a close are dropped;
    /// missing open/high/low fall back to the close and missing volume to 0.
    pub fn decode_bars(&self) -> DecodedBars {
        let quote = self.indicators.quote.first();
        let adj = self.indicators.adjclose.first();
        let column = |col: Option<&Vec<Option<f64>>>, i: usize| {
            col.and_then(|c| c.get(i).copied().flatten())
        };

        let mut bars = Vec::with_capacity(self.timestamp.len());
        let mut dropped = 0;
        for (i, &ts) in self.timestamp.iter().enumerate() {
            let close = column(quote.map(|q| &q.close), i);
            let timestamp = DateTime::<Utc>::from_timestamp(ts, 0);
            let (Some(close), Some(timestamp)) = (close, timestamp) else {
                dropped += 1;
                continue;
            };
            bars.push(Bar {
                timestamp,
                open: column(quote.map(|q| &q.open), i).unwrap_or(close),
                high: column(quote.map(|q| &q.high), i).unwrap_or(close),
                low: column(quote.map(|q| &q.low), i).unwrap_or(close),
                close,
                adj_close: column(adj.map(|a| &a.adjclose), i),
                volume: column(quote.map(|q| &q.volume), i).unwrap_or(0.0),
            });
        }
        DecodedBars { bars, dropped }
    }
}
