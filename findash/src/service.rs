//! One projection request, end to end.

use chrono::{DateTime, Utc};
use market_data_ingestor::providers::DataProvider;
use price_projection::{
    ProjectionError,
    pipeline::{ProjectionReport, SimulationParams, project, project_parallel},
};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::info;

use crate::{config::SimulationConfig, errors::FindashError, history::fetch_price_series};

/// What to project and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRequest {
    /// Yahoo symbol, e.g. `HPG.VN`.
    pub ticker: String,
    /// Calendar days of history to estimate volatility from.
    pub lookback_days: u32,
    /// Engine parameters.
    pub params: SimulationParams,
    /// Seed for the random draws; drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Simulate paths on the rayon pool.
    pub parallel: bool,
    /// Estimate from adjusted closes.
    pub adjusted_close: bool,
}

impl ProjectionRequest {
    /// A request for `ticker` using the configured defaults.
    pub fn from_config(ticker: impl Into<String>, config: &SimulationConfig) -> Self {
        Self {
            ticker: ticker.into(),
            lookback_days: config.lookback_days,
            params: config.params(),
            seed: config.seed,
            parallel: config.parallel,
            adjusted_close: config.adjusted_close,
        }
    }
}

/// A finished projection.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionOutcome {
    /// Engine output.
    #[serde(flatten)]
    pub report: ProjectionReport,
    /// Seed the run used; passing it back reproduces the run.
    pub seed: u64,
    /// Quote currency of the ticker, when known.
    pub currency: Option<String>,
}

/// Downloads history for the requested ticker and runs the projection.
///
/// Parameters are checked before anything is downloaded.
pub async fn run_projection(
    provider: &dyn DataProvider,
    request: &ProjectionRequest,
    now: DateTime<Utc>,
) -> Result<ProjectionOutcome, FindashError> {
    request.params.validate()?;
    if request.lookback_days == 0 {
        return Err(ProjectionError::InvalidParameter {
            name: "lookback_days",
            reason: "must be at least 1".to_string(),
        }
        .into());
    }

    let history = fetch_price_series(
        provider,
        &request.ticker,
        request.lookback_days,
        now,
        request.adjusted_close,
    )
    .await?;

    let seed = request.seed.unwrap_or_else(rand::random);
    info!(
        ticker = %request.ticker,
        seed,
        parallel = request.parallel,
        points = history.series.len(),
        "running projection"
    );

    let report = if request.parallel {
        project_parallel(&history.series, &request.params, seed)?
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        project(&history.series, &request.params, &mut rng)?
    };

    Ok(ProjectionOutcome {
        report,
        seed,
        currency: history.currency,
    })
}
