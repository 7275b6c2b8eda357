//! Daily returns and the volatility estimated from them.

use serde::Serialize;

use crate::errors::ProjectionError;

/// Fractional close-to-close returns, one shorter than the source prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// `r[t] = (p[t+1] - p[t]) / p[t]` for every adjacent pair.
    pub fn from_closes(closes: &[f64]) -> Self {
        Self(
            closes
                .windows(2)
                .map(|w| (w[1] - w[0]) / w[0])
                .collect(),
        )
    }

    /// Returns, oldest first.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no returns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Population standard deviation (divides by `n`, not `n - 1`).
    ///
    /// A series whose returns are all equal has a volatility of exactly zero.
    pub fn population_std_dev(&self) -> f64 {
        let Some(&first) = self.0.first() else {
            return 0.0;
        };
        if self.0.iter().all(|&r| r == first) {
            return 0.0;
        }

        let n = self.0.len() as f64;
        let mean = self.0.iter().sum::<f64>() / n;
        let var = self.0.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;
        var.sqrt()
    }
}

/// Per-step standard deviation of returns. Non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Volatility(f64);

impl Volatility {
    /// A volatility of zero: every simulated path stays flat.
    pub const ZERO: Self = Self(0.0);

    /// Wraps `value`, rejecting negative or non-finite numbers.
    pub fn new(value: f64) -> Result<Self, ProjectionError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ProjectionError::invalid(
                "volatility",
                format!("{value} is not a non-negative finite number"),
            ));
        }
        Ok(Self(value))
    }

    /// The raw standard deviation.
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_return_has_zero_volatility() {
        let r = ReturnSeries::from_closes(&[100.0, 103.0]);
        assert_eq!(r.len(), 1);
        assert_eq!(r.population_std_dev(), 0.0);
    }

    #[test]
    fn identical_returns_have_zero_volatility() {
        // 0.1 repeated does not average back to 0.1 exactly in f64.
        let r = ReturnSeries(vec![0.1, 0.1, 0.1]);
        assert_eq!(r.population_std_dev(), 0.0);
    }

    #[test]
    fn divides_by_n() {
        let r = ReturnSeries(vec![1.0, 3.0]);
        // mean 2, squared deviations 1 and 1, population variance 1
        assert_eq!(r.population_std_dev(), 1.0);
    }

    #[test]
    fn volatility_rejects_negative_and_nan() {
        assert!(Volatility::new(-0.01).is_err());
        assert!(Volatility::new(f64::NAN).is_err());
        assert!(Volatility::new(f64::INFINITY).is_err());
        assert_eq!(Volatility::new(0.0).unwrap(), Volatility::ZERO);
    }
}
