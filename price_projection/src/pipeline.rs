//! One-shot projection: price history in, ensemble and risk figures out.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::{DataShortfall, ProjectionError},
    estimator::estimate,
    histogram::{DEFAULT_HISTOGRAM_BINS, histogram},
    models::{
        ensemble::SimulationEnsemble, histogram::TerminalHistogram, price_series::PriceSeries,
        returns::Volatility, risk_summary::RiskSummary,
    },
    risk::{DEFAULT_VAR_PERCENTILE, summarize},
    simulator::{simulate, simulate_parallel},
};

/// Knobs for one projection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of simulated steps (trading days) per path.
    pub horizon_steps: usize,
    /// Number of independent paths.
    pub path_count: usize,
    /// Percentile of the terminal distribution used for VaR.
    pub percentile: f64,
    /// Bins in the terminal-price histogram.
    pub histogram_bins: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            horizon_steps: 30,
            path_count: 1000,
            percentile: DEFAULT_VAR_PERCENTILE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl SimulationParams {
    /// Rejects parameters that would fail later in the pipeline, so nothing
    /// is computed for a request that cannot complete.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.horizon_steps == 0 {
            return Err(ProjectionError::invalid("horizon_steps", "must be greater than zero"));
        }
        if self.path_count == 0 {
            return Err(ProjectionError::invalid("path_count", "must be greater than zero"));
        }
        if !self.percentile.is_finite() || !(0.0..=100.0).contains(&self.percentile) {
            return Err(ProjectionError::invalid(
                "percentile",
                format!("{} is outside [0, 100]", self.percentile),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(ProjectionError::invalid("histogram_bins", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Everything a renderer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionReport {
    /// Ticker the history belongs to.
    pub symbol: String,
    /// Timestamp of the last observed close.
    pub as_of: DateTime<Utc>,
    /// Close every path starts from.
    pub last_observed_price: f64,
    /// Number of returns the volatility was estimated from.
    pub return_count: usize,
    /// Estimated daily volatility.
    pub volatility: Volatility,
    /// Parameters the run used.
    pub params: SimulationParams,
    /// Every simulated path.
    pub ensemble: SimulationEnsemble,
    /// Final price of every path, in path order.
    pub terminal_prices: Vec<f64>,
    /// Binned `terminal_prices`.
    pub histogram: TerminalHistogram,
    /// Percentile price and Value-at-Risk.
    pub risk: RiskSummary,
}

/// Runs the full pipeline, drawing every random number from `rng`.
pub fn project<R>(
    prices: &PriceSeries,
    params: &SimulationParams,
    rng: &mut R,
) -> Result<ProjectionReport, ProjectionError>
where
    R: Rng + ?Sized,
{
    run(prices, params, |last, vol| {
        simulate(last, vol, params.horizon_steps, params.path_count, rng)
    })
}

/// Runs the full pipeline with paths simulated in parallel from `seed`.
///
/// See [`simulate_parallel`] for how the seed is split across paths.
pub fn project_parallel(
    prices: &PriceSeries,
    params: &SimulationParams,
    seed: u64,
) -> Result<ProjectionReport, ProjectionError> {
    run(prices, params, |last, vol| {
        simulate_parallel(last, vol, params.horizon_steps, params.path_count, seed)
    })
}

fn run<F>(
    prices: &PriceSeries,
    params: &SimulationParams,
    simulate_paths: F,
) -> Result<ProjectionReport, ProjectionError>
where
    F: FnOnce(f64, Volatility) -> Result<SimulationEnsemble, ProjectionError>,
{
    params.validate()?;

    let (returns, volatility) = estimate(prices)?;
    let last = prices.last().ok_or_else(|| ProjectionError::InsufficientData {
        symbol: prices.symbol().to_string(),
        cause: DataShortfall::NoHistory,
    })?;

    let ensemble = simulate_paths(last.close, volatility)?;
    let terminal_prices = ensemble.terminal_prices();
    let risk = summarize(&ensemble, last.close, params.percentile)?;
    let histogram = histogram(&terminal_prices, params.histogram_bins)?;

    info!(
        symbol = prices.symbol(),
        last_price = last.close,
        percentile_price = risk.percentile_price,
        value_at_risk = risk.value_at_risk,
        "projection complete"
    );

    Ok(ProjectionReport {
        symbol: prices.symbol().to_string(),
        as_of: last.timestamp,
        last_observed_price: last.close,
        return_count: returns.len(),
        volatility,
        params: *params,
        ensemble,
        terminal_prices,
        histogram,
        risk,
    })
}
