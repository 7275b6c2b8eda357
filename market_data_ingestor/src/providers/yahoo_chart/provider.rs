use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};
use tracing::{debug, warn};

use crate::{
    models::{bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InternalSnafu, InvalidBaseUrlSnafu,
        InvalidUserAgentSnafu, ProviderError, ProviderInitError, ReqwestSnafu,
        yahoo_chart::{params::construct_params, response::ChartEnvelope},
    },
};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The chart endpoint rejects requests without a browser-like agent.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Connection settings for [`YahooChartProvider`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct YahooChartConfig {
    /// Scheme and host, without the `/v8/...` path.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Client-side throttle.
    pub requests_per_minute: NonZeroU32,
    pub user_agent: String,
}

impl Default for YahooChartConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            requests_per_minute: nonzero!(60u32),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub struct YahooChartProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    /// Creates a provider against the public Yahoo endpoint.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_config(YahooChartConfig::default())
    }

    pub fn with_config(config: YahooChartConfig) -> Result<Self, ProviderInitError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return InvalidBaseUrlSnafu { url: config.base_url }.fail();
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent).context(InvalidUserAgentSnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url,
            limiter: RateLimiter::direct(Quota::per_minute(config.requests_per_minute)),
        })
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        query: &[(String, String)],
        params: &BarsRequestParams,
    ) -> Result<BarSeries, ProviderError> {
        self.limiter.until_ready().await;

        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!(%symbol, %url, "requesting chart");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        if !status.is_success() {
            // Yahoo usually explains failures in the chart.error payload.
            let message = serde_json::from_str::<ChartEnvelope>(&body)
                .ok()
                .and_then(|env| env.chart.error)
                .map(|e| format!("{} ({}): {}", status, e.code, e.description))
                .unwrap_or_else(|| format!("{status}: {body}"));
            return ApiSnafu { message }.fail();
        }

        let envelope: ChartEnvelope = serde_json::from_str(&body).map_err(|e| {
            InternalSnafu {
                message: format!("unexpected chart payload for {symbol}: {e}"),
            }
            .build()
        })?;

        if let Some(err) = envelope.chart.error {
            return ApiSnafu {
                message: format!("{}: {}", err.code, err.description),
            }
            .fail();
        }

        let result = envelope
            .chart
            .result
            .and_then(|mut r| (!r.is_empty()).then(|| r.swap_remove(0)))
            .context(InternalSnafu {
                message: format!("chart payload for {symbol} has no result"),
            })?;

        let decoded = result.decode_bars();
        if decoded.dropped > 0 {
            warn!(%symbol, dropped = decoded.dropped, "skipped bars without a close");
        }

        Ok(BarSeries {
            symbol: symbol.to_string(),
            timeframe: params.timeframe,
            currency: result.meta.currency,
            bars: decoded.bars,
        })
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        let query = construct_params(&params)?;

        let mut result = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            result.push(self.fetch_symbol(symbol, &query, &params).await?);
        }
        Ok(result)
    }
}
