//! Application error type.

use market_data_ingestor::{
    constituents::ConstituentError,
    providers::{ProviderError, ProviderInitError},
};
use price_projection::{DataShortfall, ProjectionError};
use shared_utils::config::ConfigError;
use thiserror::Error;

/// Errors surfaced by the findash library.
#[derive(Debug, Error)]
pub enum FindashError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The projection pipeline rejected its input.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// A parameter is valid for the engine but not among the choices offered
    /// to users.
    #[error("{name} {value} is not one of the offered choices {allowed:?}")]
    NotOffered {
        /// Parameter name.
        name: &'static str,
        /// Requested value.
        value: usize,
        /// Values users may pick from.
        allowed: Vec<usize>,
    },

    /// An HTTP client could not be built.
    #[error(transparent)]
    ProviderInit(#[from] ProviderInitError),

    /// The constituent board could not be scraped.
    #[error(transparent)]
    Constituents(#[from] ConstituentError),

    /// Bars for a chart or portfolio view could not be downloaded.
    #[error("failed to download bars for {symbol}: {source}")]
    Download {
        /// Ticker being fetched.
        symbol: String,
        /// Provider failure.
        source: ProviderError,
    },

    /// The provider answered without any bars in the requested window.
    #[error("no price data for {symbol} in the requested window")]
    NoData {
        /// Ticker, or comma-separated tickers, that came back empty.
        symbol: String,
    },

    /// A command that needs tickers was given none.
    #[error("no tickers given")]
    NoTickers,
}

impl FindashError {
    /// Message suitable for end users; the `Display` output is meant for logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Projection(ProjectionError::InsufficientData { symbol, cause }) => match cause {
                DataShortfall::Unavailable { .. } => format!(
                    "Could not download price data for {symbol}. Check the connection or choose another ticker."
                ),
                DataShortfall::NoHistory => {
                    format!("{symbol} has no trading history in the selected window.")
                }
                DataShortfall::TooFewPoints { found, required } => format!(
                    "{symbol} has only {found} usable closing prices; at least {required} are needed."
                ),
            },
            Self::Download {
                symbol,
                source: ProviderError::Validation { message, .. },
            } => format!("Cannot request {symbol}: {message}"),
            Self::Download { symbol, .. } => format!(
                "Could not download price data for {symbol}. Check the connection or choose another ticker."
            ),
            Self::Constituents(_) => {
                "Could not load the VN30 constituent list. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_distinguishes_shortfalls() {
        let unavailable = FindashError::from(ProjectionError::InsufficientData {
            symbol: "HPG.VN".into(),
            cause: DataShortfall::Unavailable {
                message: "timeout".into(),
            },
        });
        let no_history = FindashError::from(ProjectionError::InsufficientData {
            symbol: "HPG.VN".into(),
            cause: DataShortfall::NoHistory,
        });

        assert!(unavailable.user_message().contains("Could not download"));
        assert!(no_history.user_message().contains("no trading history"));
        assert_ne!(unavailable.user_message(), no_history.user_message());
    }

    #[test]
    fn download_message_explains_bad_interval() {
        use market_data_ingestor::providers::{ApiSnafu, ValidationSnafu};

        let bad_interval = FindashError::Download {
            symbol: "FPT.VN".into(),
            source: ValidationSnafu {
                message: "Yahoo chart API does not support a 4 hour interval",
            }
            .build(),
        };
        let outage = FindashError::Download {
            symbol: "FPT.VN".into(),
            source: ApiSnafu { message: "503" }.build(),
        };

        assert!(bad_interval.user_message().contains("4 hour interval"));
        assert!(outage.user_message().contains("Could not download price data for FPT.VN"));
    }

    #[test]
    fn not_offered_lists_choices() {
        let err = FindashError::NotOffered {
            name: "path_count",
            value: 300,
            allowed: vec![200, 500, 1000],
        };
        assert_eq!(
            err.user_message(),
            "path_count 300 is not one of the offered choices [200, 500, 1000]"
        );
    }
}
