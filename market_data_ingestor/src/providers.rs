//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the unified interface for
//! fetching time-series bar data from any market data vendor.
//!
//! Each concrete provider (currently [`yahoo_chart::YahooChartProvider`])
//! implements [`DataProvider`] to handle vendor-specific API logic and
//! validation. The trait is async and object safe, so callers can hold a
//! `dyn DataProvider` chosen at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{
//!     bar_series::BarSeries,
//!     request_params::BarsRequestParams,
//! };
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(
//!         &self,
//!         _params: BarsRequestParams,
//!     ) -> Result<Vec<BarSeries>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod yahoo_chart;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{bar_series::BarSeries, request_params::BarsRequestParams};

/// Trait for fetching time-series bar data from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches time-series bar data for the given request parameters.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BarSeries>)` - One bar series per requested symbol, in request
    ///   order. A symbol with no bars in the window yields an empty series.
    /// * `Err(ProviderError)` - If the request fails.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// User agent contains characters not allowed in a header.
    #[snafu(display("Invalid user agent: {source}"))]
    InvalidUserAgent {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// Base URL is empty or does not use http(s).
    #[snafu(display("Invalid base URL '{url}'"))]
    InvalidBaseUrl { url: String, backtrace: Backtrace },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned an error (non-success status or an error payload).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The response could not be mapped onto the canonical models.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    struct EmptyProvider;
    struct FailingProvider;

    #[async_trait]
    impl DataProvider for EmptyProvider {
        async fn fetch_bars(
            &self,
            params: BarsRequestParams,
        ) -> Result<Vec<BarSeries>, ProviderError> {
            Ok(params
                .symbols
                .into_iter()
                .map(|symbol| BarSeries {
                    symbol,
                    timeframe: params.timeframe,
                    currency: None,
                    bars: vec![],
                })
                .collect())
        }
    }

    #[async_trait]
    impl DataProvider for FailingProvider {
        async fn fetch_bars(
            &self,
            _params: BarsRequestParams,
        ) -> Result<Vec<BarSeries>, ProviderError> {
            ApiSnafu { message: "down for maintenance" }.fail()
        }
    }

    // Picks the provider at runtime; only possible through `dyn DataProvider`.
    fn get_provider(name: &str) -> Box<dyn DataProvider> {
        if name == "empty" {
            Box::new(EmptyProvider)
        } else {
            Box::new(FailingProvider)
        }
    }

    #[tokio::test]
    async fn test_dynamic_provider() {
        let params = BarsRequestParams::daily("VNM.VN", Utc::now(), Utc::now());

        let series = get_provider("empty").fetch_bars(params.clone()).await.unwrap();
        assert_eq!(series.len(), 1);
        assert!(series[0].is_empty());

        let err = get_provider("failing").fetch_bars(params).await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { .. }));
        assert_eq!(err.to_string(), "API error: down for maintenance");
    }
}
