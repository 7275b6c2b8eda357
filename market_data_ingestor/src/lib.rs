//! Market data ingestion.
//!
//! - [`models`]: vendor-agnostic bars, series, timeframes and request parameters.
//! - [`providers`]: the [`DataProvider`](providers::DataProvider) trait and its
//!   Yahoo Finance chart implementation.
//! - [`constituents`]: index constituent lists scraped from an HTML board.

pub mod constituents;
pub mod models;
pub mod providers;
