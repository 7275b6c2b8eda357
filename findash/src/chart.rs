//! Price chart data: OHLCV bars for a window with SMA and MACD overlays.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use market_data_ingestor::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::TimeFrame,
    },
    providers::{DataProvider, yahoo_chart::YahooChartParams},
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    errors::FindashError,
    indicators::{SMA_WINDOW, macd, sma},
};

/// Look-back presets offered by the chart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartDuration {
    /// 30 days.
    OneMonth,
    /// 90 days.
    ThreeMonths,
    /// 180 days.
    SixMonths,
    /// Since 1 January of the current year.
    YearToDate,
    /// 365 days.
    OneYear,
    /// 3 × 365 days.
    ThreeYears,
    /// 5 × 365 days.
    FiveYears,
    /// Everything the provider has.
    Max,
}

impl ChartDuration {
    /// First instant of the window ending at `now`.
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = match self {
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::ThreeYears => 365 * 3,
            Self::FiveYears => 365 * 5,
            Self::YearToDate => {
                return Utc
                    .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
                    .single()
                    .unwrap_or(now);
            }
            Self::Max => return DateTime::<Utc>::UNIX_EPOCH,
        };
        now - Duration::days(days)
    }
}

impl FromStr for ChartDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Self::OneMonth),
            "3M" => Ok(Self::ThreeMonths),
            "6M" => Ok(Self::SixMonths),
            "YTD" => Ok(Self::YearToDate),
            "1Y" => Ok(Self::OneYear),
            "3Y" => Ok(Self::ThreeYears),
            "5Y" => Ok(Self::FiveYears),
            "MAX" => Ok(Self::Max),
            other => Err(format!(
                "unknown duration '{other}', expected one of 1M, 3M, 6M, YTD, 1Y, 3Y, 5Y, MAX"
            )),
        }
    }
}

impl fmt::Display for ChartDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::YearToDate => "YTD",
            Self::OneYear => "1Y",
            Self::ThreeYears => "3Y",
            Self::FiveYears => "5Y",
            Self::Max => "MAX",
        })
    }
}

/// Time range a chart covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartWindow {
    /// A preset ending now.
    Preset(ChartDuration),
    /// Calendar dates, both inclusive.
    Dates {
        /// First day shown.
        start: NaiveDate,
        /// Last day shown.
        end: NaiveDate,
    },
}

impl ChartWindow {
    /// `[start, end)` in UTC.
    pub fn bounds(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Self::Preset(d) => (d.start(now), now),
            Self::Dates { start, end } => {
                let start = start.and_time(NaiveTime::MIN).and_utc();
                let end = (end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
                (start, end)
            }
        }
    }
}

/// What to chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    /// Yahoo symbol.
    pub ticker: String,
    /// Bar interval.
    pub interval: TimeFrame,
    /// Time range.
    pub window: ChartWindow,
    /// Ask for pre- and post-market bars on intraday intervals.
    pub include_pre_post: bool,
}

/// One bar with its indicator values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    /// Bar open time.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
    /// 50-bar simple moving average of the close, once enough bars exist.
    pub sma50: Option<f64>,
    /// MACD line.
    pub macd: f64,
    /// MACD signal line.
    pub signal: f64,
    /// MACD histogram.
    pub hist: f64,
}

/// Bars and overlays for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Yahoo symbol.
    pub symbol: String,
    /// Bar interval.
    pub interval: TimeFrame,
    /// Quote currency, when known.
    pub currency: Option<String>,
    /// Bars oldest first.
    pub rows: Vec<ChartRow>,
}

/// Downloads bars for `request` and computes the overlays.
///
/// Indicators are computed over the bars inside the window only, so the SMA
/// stays empty for windows shorter than [`SMA_WINDOW`] bars.
pub async fn load_chart(
    provider: &dyn DataProvider,
    request: &ChartRequest,
    now: DateTime<Utc>,
) -> Result<ChartData, FindashError> {
    let (start, end) = request.window.bounds(now);
    let mut params = BarsRequestParams::single(&request.ticker, request.interval, start, end);
    if request.include_pre_post {
        params = params.with_provider_params(ProviderParams::Yahoo(YahooChartParams {
            include_pre_post: true,
        }));
    }

    let series = provider.fetch_bars(params).await.map_err(|source| {
        warn!(ticker = %request.ticker, error = %source, "chart download failed");
        FindashError::Download {
            symbol: request.ticker.clone(),
            source,
        }
    })?;
    let bars = series
        .into_iter()
        .find(|s| s.symbol == request.ticker)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FindashError::NoData {
            symbol: request.ticker.clone(),
        })?;

    let closes: Vec<f64> = bars.bars.iter().map(|b| b.close).collect();
    let sma50 = sma(&closes, SMA_WINDOW);
    let m = macd(&closes);
    debug!(ticker = %request.ticker, bars = closes.len(), "chart ready");

    let rows = bars
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| ChartRow {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            sma50: sma50[i],
            macd: m.macd[i],
            signal: m.signal[i],
            hist: m.hist[i],
        })
        .collect();

    Ok(ChartData {
        symbol: bars.symbol,
        interval: request.interval,
        currency: bars.currency,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn presets_parse_case_insensitively() {
        assert_eq!("ytd".parse::<ChartDuration>(), Ok(ChartDuration::YearToDate));
        assert_eq!("5Y".parse::<ChartDuration>(), Ok(ChartDuration::FiveYears));
        assert!("2W".parse::<ChartDuration>().is_err());
        assert_eq!(ChartDuration::ThreeMonths.to_string(), "3M");
    }

    #[test]
    fn preset_starts() {
        assert_eq!(ChartDuration::OneMonth.start(now()), now() - Duration::days(30));
        assert_eq!(
            ChartDuration::YearToDate.start(now()),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(ChartDuration::Max.start(now()), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn date_window_includes_the_end_day() {
        let window = ChartWindow::Dates {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        };
        let (start, end) = window.bounds(now());
        assert_eq!(start, Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}
