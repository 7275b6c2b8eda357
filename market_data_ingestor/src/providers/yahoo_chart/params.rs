use serde::{Deserialize, Serialize};

use crate::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Yahoo-specific parameters for a chart request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct YahooChartParams {
    /// Include pre- and post-market bars (intraday intervals only).
    #[serde(default)]
    pub include_pre_post: bool,
}

impl YahooChartParams {
    pub(crate) fn from_request(params: &BarsRequestParams) -> Self {
        match &params.provider_specific {
            ProviderParams::Yahoo(p) => p.clone(),
            ProviderParams::None => Self::default(),
        }
    }
}

/// Maps a [`TimeFrame`] to Yahoo's `interval` query value.
pub fn validate_timeframe(timeframe: &TimeFrame) -> Result<&'static str, ProviderError> {
    let interval = match (timeframe.unit, timeframe.amount) {
        (TimeFrameUnit::Minute, 1) => "1m",
        (TimeFrameUnit::Minute, 2) => "2m",
        (TimeFrameUnit::Minute, 5) => "5m",
        (TimeFrameUnit::Minute, 15) => "15m",
        (TimeFrameUnit::Minute, 30) => "30m",
        (TimeFrameUnit::Minute, 60) | (TimeFrameUnit::Hour, 1) => "60m",
        (TimeFrameUnit::Minute, 90) => "90m",
        (TimeFrameUnit::Day, 1) => "1d",
        (TimeFrameUnit::Day, 5) => "5d",
        (TimeFrameUnit::Week, 1) => "1wk",
        (TimeFrameUnit::Month, 1) => "1mo",
        (TimeFrameUnit::Month, 3) => "3mo",
        _ => {
            return ValidationSnafu {
                message: format!("Yahoo chart API does not support a {timeframe} interval"),
            }
            .fail();
        }
    };
    Ok(interval)
}

/// Builds the query string for one symbol's chart request.
pub fn construct_params(
    params: &BarsRequestParams,
) -> Result<Vec<(String, String)>, ProviderError> {
    let interval = validate_timeframe(&params.timeframe)?;
    if params.start >= params.end {
        return ValidationSnafu {
            message: format!("start {} is not before end {}", params.start, params.end),
        }
        .fail();
    }
    let yahoo = YahooChartParams::from_request(params);

    Ok(vec![
        ("period1".to_string(), params.start.timestamp().to_string()),
        ("period2".to_string(), params.end.timestamp().to_string()),
        ("interval".to_string(), interval.to_string()),
        ("includePrePost".to_string(), yahoo.include_pre_post.to_string()),
        ("events".to_string(), "div,split".to_string()),
    ])
}
