//! Daily close trend for a hand-picked set of tickers.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use indexmap::IndexSet;
use market_data_ingestor::{models::request_params::BarsRequestParams, providers::DataProvider};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::FindashError;

/// Years of history shown when the caller does not choose.
pub const DEFAULT_PORTFOLIO_YEARS: u32 = 5;
/// Constituents preselected when no tickers are given.
pub const DEFAULT_PORTFOLIO_SIZE: usize = 3;

/// Tickers to plot and how far back.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRequest {
    /// Yahoo symbols; duplicates and blanks are ignored.
    pub tickers: Vec<String>,
    /// Years of daily history, at least one.
    pub years: u32,
}

/// Closes of every loaded ticker on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    /// Trading day.
    pub date: NaiveDate,
    /// One entry per [`PortfolioTrend::tickers`]; `None` where that ticker
    /// did not trade.
    pub closes: Vec<Option<f64>>,
}

/// Date-aligned daily closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioTrend {
    /// Tickers with data, in request order.
    pub tickers: Vec<String>,
    /// Tickers that failed to download or had no bars.
    pub skipped: Vec<String>,
    /// Days on which at least one ticker traded, oldest first.
    pub rows: Vec<TrendRow>,
}

/// Downloads daily closes for every requested ticker and aligns them by date.
///
/// A ticker that fails is skipped with a warning; the call only fails when
/// none of them yields data.
pub async fn load_portfolio(
    provider: &dyn DataProvider,
    request: &PortfolioRequest,
    now: DateTime<Utc>,
) -> Result<PortfolioTrend, FindashError> {
    let tickers: IndexSet<&str> = request
        .tickers
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if tickers.is_empty() {
        return Err(FindashError::NoTickers);
    }

    let start = now - Duration::days(365 * i64::from(request.years.max(1)));
    let mut loaded: Vec<(String, Vec<(NaiveDate, f64)>)> = Vec::new();
    let mut skipped = Vec::new();

    for &ticker in &tickers {
        let params = BarsRequestParams::daily(ticker, start, now);
        let closes = match provider.fetch_bars(params).await {
            Ok(series) => series
                .into_iter()
                .find(|s| s.symbol == ticker)
                .map(|s| {
                    s.bars
                        .iter()
                        .filter(|b| b.close.is_finite())
                        .map(|b| (b.timestamp.date_naive(), b.close))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            Err(e) => {
                warn!(ticker, error = %e, "skipping ticker");
                Vec::new()
            }
        };
        if closes.is_empty() {
            skipped.push(ticker.to_string());
        } else {
            loaded.push((ticker.to_string(), closes));
        }
    }

    if loaded.is_empty() {
        return Err(FindashError::NoData {
            symbol: tickers.into_iter().collect::<Vec<_>>().join(","),
        });
    }

    let width = loaded.len();
    let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (column, (_, closes)) in loaded.iter().enumerate() {
        for &(date, close) in closes {
            by_date.entry(date).or_insert_with(|| vec![None; width])[column] = Some(close);
        }
    }
    info!(tickers = width, skipped = skipped.len(), days = by_date.len(), "portfolio loaded");

    Ok(PortfolioTrend {
        tickers: loaded.into_iter().map(|(t, _)| t).collect(),
        skipped,
        rows: by_date
            .into_iter()
            .map(|(date, closes)| TrendRow { date, closes })
            .collect(),
    })
}
