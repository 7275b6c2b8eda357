//! Bar interval (amount × unit).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFrameError {
    #[error("Invalid amount for {unit}: {message}")]
    InvalidAmount { unit: TimeFrameUnit, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl fmt::Display for TimeFrameUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        };
        f.write_str(s)
    }
}

/// A universal bar interval. Which combinations are valid is decided by each
/// provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Self {
        Self { amount, unit }
    }

    pub fn day() -> Self {
        Self::new(1, TimeFrameUnit::Day)
    }

    /// Parses the short forms used on the command line: `1d`, `1wk`, `1mo`,
    /// `5m`, `1h`.
    pub fn parse(input: &str) -> Result<Self, TimeFrameError> {
        let s = input.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TimeFrameError::InvalidInput {
                message: format!("missing unit in '{input}'"),
            })?;
        let (amount, unit) = s.split_at(split);
        let amount: u32 = amount.parse().map_err(|_| TimeFrameError::InvalidInput {
            message: format!("missing amount in '{input}'"),
        })?;

        let unit = match unit {
            "m" | "min" => TimeFrameUnit::Minute,
            "h" => TimeFrameUnit::Hour,
            "d" => TimeFrameUnit::Day,
            "wk" | "w" => TimeFrameUnit::Week,
            "mo" => TimeFrameUnit::Month,
            other => {
                return Err(TimeFrameError::InvalidInput {
                    message: format!("unknown unit '{other}'"),
                });
            }
        };
        if amount == 0 {
            return Err(TimeFrameError::InvalidAmount {
                unit,
                message: "amount must be at least 1".into(),
            });
        }
        Ok(Self::new(amount, unit))
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}
