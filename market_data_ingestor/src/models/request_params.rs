use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{models::timeframe::TimeFrame, providers::yahoo_chart::YahooChartParams};

/// Universal parameters for requesting time-series bar data from any market data provider.
///
/// This struct is vendor-agnostic. It is the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// List of symbols to request (e.g., `["HPG.VN"]`, `["AAPL"]`).
    pub symbols: Vec<String>,

    /// The time interval for each bar (e.g., 1 day).
    ///
    /// **Validation of allowed values is performed by each data provider
    /// implementation, according to their own API rules.**
    pub timeframe: TimeFrame,

    /// Start of the requested time range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested time range (exclusive, UTC).
    pub end: DateTime<Utc>,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl BarsRequestParams {
    /// Bars of `timeframe` for one symbol over `[start, end)`.
    pub fn single(
        symbol: impl Into<String>,
        timeframe: TimeFrame,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            symbols: vec![symbol.into()],
            timeframe,
            start,
            end,
            provider_specific: ProviderParams::None,
        }
    }

    /// Attaches provider-specific options.
    pub fn with_provider_params(mut self, params: ProviderParams) -> Self {
        self.provider_specific = params;
        self
    }

    /// Daily bars for one symbol over `[start, end)`.
    pub fn daily(symbol: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::single(symbol, TimeFrame::day(), start, end)
    }
}

/// Provider-specific request parameters.
///
/// Lets callers pass per-request options for a particular provider without
/// cluttering the universal [`BarsRequestParams`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Yahoo(YahooChartParams),
}
