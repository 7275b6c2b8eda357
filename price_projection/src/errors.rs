//! Error types for the projection pipeline.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The error type for every fallible operation in this crate.
///
/// Both variants are terminal for the invocation that produced them: the
/// computation is deterministic given its inputs, so nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Not enough usable price history to estimate volatility.
    #[error("insufficient price data for {symbol}: {cause}")]
    InsufficientData {
        /// Ticker the data was requested for.
        symbol: String,
        /// Why the data is insufficient.
        cause: DataShortfall,
    },

    /// A parameter was outside its domain. Raised before any computation.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },
}

impl ProjectionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Cause attached to [`ProjectionError::InsufficientData`].
///
/// Lets callers tell "this ticker has no usable history" apart from "the
/// history could not be retrieved" while both stop the pipeline the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataShortfall {
    /// The series holds fewer points than the estimator needs.
    TooFewPoints {
        /// Number of valid points found.
        found: usize,
        /// Minimum number of points required.
        required: usize,
    },
    /// The data source answered, but with no bars for the ticker.
    NoHistory,
    /// The data source could not be reached or returned an error.
    Unavailable {
        /// Description of the upstream failure.
        message: String,
    },
}

impl fmt::Display for DataShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { found, required } => {
                write!(f, "found {found} valid price points, need at least {required}")
            }
            Self::NoHistory => f.write_str("no trading history in the requested window"),
            Self::Unavailable { message } => write!(f, "price history unavailable: {message}"),
        }
    }
}
