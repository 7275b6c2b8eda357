//! Index constituent lists scraped from an HTML price board.
//!
//! The board renders one `<tr>` per constituent inside a `<tbody>`; the first
//! cell holds the ticker, sometimes followed by `*` markers (e.g. `HPG*`,
//! `POW**`). Only 3 to 5 letter upper-case tickers are kept, which also
//! filters out the index row itself (`VN30`).

use std::time::Duration;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, header};
use snafu::{Backtrace, ResultExt, Snafu, ensure};
use tracing::{debug, info};

use crate::providers::{ClientBuildSnafu, InvalidUserAgentSnafu, ProviderInitError};

/// VN30 board on Vietstock.
pub const VN30_BOARD_URL: &str = "https://banggia.vietstock.vn/?id=vn30";

/// Suffix Yahoo Finance uses for Ho Chi Minh City listings.
pub const YAHOO_VN_SUFFIX: &str = ".VN";

static TBODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tbody[^>]*>(.*?)</tbody>").unwrap());
static ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap());
static FIRST_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static TICKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3,5}$").unwrap());

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConstituentError {
    #[snafu(display("Failed to fetch constituent board: {source}"))]
    Fetch {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Constituent board {url} answered {status}"))]
    Status {
        url: String,
        status: u16,
        backtrace: Backtrace,
    },

    #[snafu(display("No constituents found on {url}"))]
    Empty { url: String, backtrace: Backtrace },
}

/// Extracts tickers from the first cell of every table-body row, in page
/// order and without duplicates.
pub fn parse_constituents(html: &str) -> Vec<String> {
    let mut symbols = IndexSet::new();
    for body in TBODY.captures_iter(html) {
        for row in ROW.captures_iter(&body[1]) {
            let Some(cell) = FIRST_CELL.captures(&row[1]) else {
                continue;
            };
            let text = TAG.replace_all(&cell[1], "").replace("&nbsp;", " ");
            let symbol = text.trim().to_uppercase();
            let symbol = symbol.trim_end_matches('*').trim_end();
            if TICKER.is_match(symbol) {
                symbols.insert(symbol.to_string());
            }
        }
    }
    symbols.into_iter().collect()
}

/// Appends `suffix` to every symbol.
pub fn with_suffix(symbols: Vec<String>, suffix: &str) -> Vec<String> {
    symbols.into_iter().map(|s| format!("{s}{suffix}")).collect()
}

pub struct ConstituentScraper {
    client: Client,
    url: String,
    yahoo_suffix: bool,
}

impl ConstituentScraper {
    pub fn new(
        url: impl Into<String>,
        yahoo_suffix: bool,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(user_agent).context(InvalidUserAgentSnafu)?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            url: url.into(),
            yahoo_suffix,
        })
    }

    /// Downloads the board and returns its constituents, optionally with the
    /// Yahoo `.VN` suffix.
    pub async fn fetch(&self) -> Result<Vec<String>, ConstituentError> {
        debug!(url = %self.url, "fetching constituent board");
        let response = self.client.get(&self.url).send().await.context(FetchSnafu)?;
        let status = response.status();
        ensure!(
            status.is_success(),
            StatusSnafu {
                url: self.url.clone(),
                status: status.as_u16()
            }
        );

        let html = response.text().await.context(FetchSnafu)?;
        let symbols = parse_constituents(&html);
        ensure!(!symbols.is_empty(), EmptySnafu { url: self.url.clone() });
        info!(count = symbols.len(), "loaded constituents");

        Ok(if self.yahoo_suffix {
            with_suffix(symbols, YAHOO_VN_SUFFIX)
        } else {
            symbols
        })
    }
}
