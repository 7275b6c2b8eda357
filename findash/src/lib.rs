//! Dashboard backend for index constituents, price charts, portfolio trends
//! and Monte Carlo price projections.
//!
//! The crate glues the network-facing pieces of [`market_data_ingestor`] to
//! the pure [`price_projection`] engine:
//!
//! - [`history`] turns provider bars into a validated price series and maps
//!   every retrieval failure to an insufficient-data error.
//! - [`service`] runs one projection request end to end.
//! - [`chart`] and [`portfolio`] load bars for the chart and trend views;
//!   [`indicators`] holds their moving averages.
//! - [`report`] renders results as text or JSON.

#![deny(missing_docs)]

pub mod chart;
pub mod config;
pub mod errors;
pub mod history;
pub mod indicators;
pub mod portfolio;
pub mod report;
pub mod service;
