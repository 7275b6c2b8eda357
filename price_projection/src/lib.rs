//! Monte Carlo price projection and Value-at-Risk estimation.
//!
//! The crate is pure and synchronous. A projection runs in three stages:
//!
//! 1. [`estimator::estimate`] turns a [`PriceSeries`](models::price_series::PriceSeries)
//!    into daily returns and their population standard deviation.
//! 2. [`simulator::simulate`] (or [`simulator::simulate_parallel`]) grows an
//!    ensemble of independent price paths by compounding `N(0, σ)` returns
//!    onto the last observed close.
//! 3. [`risk::summarize`] reads the terminal row of the ensemble and reports
//!    the empirical percentile price and the resulting Value-at-Risk.
//!
//! [`pipeline::project`] wires the three stages together for callers that
//! only hold a price series and a set of [`SimulationParams`](pipeline::SimulationParams).
//!
//! Randomness is always injected, either as a `&mut impl Rng` or as an
//! explicit seed, so every run is reproducible.

#![deny(missing_docs)]

pub mod errors;
pub mod estimator;
pub mod histogram;
pub mod models;
pub mod pipeline;
pub mod risk;
pub mod simulator;

pub use errors::{DataShortfall, ProjectionError};
