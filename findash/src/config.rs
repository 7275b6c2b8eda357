//! `findash.toml` loading and validation.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration pointed at the public Yahoo and Vietstock endpoints.

use std::path::Path;

use market_data_ingestor::{constituents::VN30_BOARD_URL, providers::yahoo_chart::YahooChartConfig};
use price_projection::pipeline::SimulationParams;
use serde::Deserialize;
use shared_utils::{
    config::{ConfigError, load_toml_path},
    env::get_env_var_opt,
};
use tracing::debug;

use crate::errors::FindashError;

/// Environment variable consulted when no `--config` path is given.
pub const CONFIG_ENV_VAR: &str = "FINDASH_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FindashConfig {
    /// Price data provider connection.
    pub provider: YahooChartConfig,
    /// Constituent board scraping.
    pub constituents: ConstituentsConfig,
    /// Projection defaults and user-facing choices.
    pub simulation: SimulationConfig,
}

/// Where to scrape the constituent list from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstituentsConfig {
    /// Board URL.
    pub url: String,
    /// Append `.VN` so symbols can be passed straight to Yahoo.
    pub yahoo_suffix: bool,
}

impl Default for ConstituentsConfig {
    fn default() -> Self {
        Self {
            url: VN30_BOARD_URL.to_string(),
            yahoo_suffix: true,
        }
    }
}

/// Projection defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Calendar days of history used to estimate volatility.
    pub lookback_days: u32,
    /// Default number of simulated paths.
    pub path_count: usize,
    /// Default number of simulated trading days.
    pub horizon_steps: usize,
    /// Percentile of the terminal distribution used for VaR.
    pub percentile: f64,
    /// Bins in the terminal-price histogram.
    pub histogram_bins: usize,
    /// Fixed seed; a fresh one is drawn per run when unset.
    pub seed: Option<u64>,
    /// Simulate paths on the rayon pool.
    pub parallel: bool,
    /// Estimate volatility from split/dividend adjusted closes.
    pub adjusted_close: bool,
    /// Path counts users may choose from.
    pub allowed_path_counts: Vec<usize>,
    /// Horizons users may choose from.
    pub allowed_horizons: Vec<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            lookback_days: 365,
            path_count: params.path_count,
            horizon_steps: params.horizon_steps,
            percentile: params.percentile,
            histogram_bins: params.histogram_bins,
            seed: None,
            parallel: false,
            adjusted_close: false,
            allowed_path_counts: vec![200, 500, 1000],
            allowed_horizons: vec![30, 60, 90],
        }
    }
}

impl SimulationConfig {
    /// Engine parameters for the configured defaults.
    pub fn params(&self) -> SimulationParams {
        SimulationParams {
            horizon_steps: self.horizon_steps,
            path_count: self.path_count,
            percentile: self.percentile,
            histogram_bins: self.histogram_bins,
        }
    }

    /// Checks that `path_count` and `horizon_steps` are among the choices
    /// offered to users. The engine itself accepts any positive value.
    pub fn check_offered(
        &self,
        path_count: usize,
        horizon_steps: usize,
    ) -> Result<(), FindashError> {
        if !self.allowed_path_counts.contains(&path_count) {
            return Err(FindashError::NotOffered {
                name: "path_count",
                value: path_count,
                allowed: self.allowed_path_counts.clone(),
            });
        }
        if !self.allowed_horizons.contains(&horizon_steps) {
            return Err(FindashError::NotOffered {
                name: "horizon_steps",
                value: horizon_steps,
                allowed: self.allowed_horizons.clone(),
            });
        }
        Ok(())
    }
}

impl FindashConfig {
    /// Loads from `path`, else from `$FINDASH_CONFIG`, else defaults; then validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = match path {
            Some(p) => load_toml_path(p)?,
            None => match get_env_var_opt(CONFIG_ENV_VAR) {
                Some(p) => load_toml_path(p)?,
                None => {
                    debug!("no config file given, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the rest of the application cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.lookback_days == 0 {
            return Err(ConfigError::invalid("simulation.lookback_days", "must be at least 1"));
        }
        if sim.histogram_bins == 0 {
            return Err(ConfigError::invalid("simulation.histogram_bins", "must be at least 1"));
        }
        if !sim.percentile.is_finite() || !(0.0..=100.0).contains(&sim.percentile) {
            return Err(ConfigError::invalid(
                "simulation.percentile",
                format!("{} is outside [0, 100]", sim.percentile),
            ));
        }
        if sim.allowed_path_counts.is_empty() || sim.allowed_path_counts.contains(&0) {
            return Err(ConfigError::invalid(
                "simulation.allowed_path_counts",
                "must list at least one positive value",
            ));
        }
        if sim.allowed_horizons.is_empty() || sim.allowed_horizons.contains(&0) {
            return Err(ConfigError::invalid(
                "simulation.allowed_horizons",
                "must list at least one positive value",
            ));
        }
        if !sim.allowed_path_counts.contains(&sim.path_count) {
            return Err(ConfigError::invalid(
                "simulation.path_count",
                format!("{} is not in allowed_path_counts", sim.path_count),
            ));
        }
        if !sim.allowed_horizons.contains(&sim.horizon_steps) {
            return Err(ConfigError::invalid(
                "simulation.horizon_steps",
                format!("{} is not in allowed_horizons", sim.horizon_steps),
            ));
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::invalid("provider.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}
