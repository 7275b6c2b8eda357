//! Data types flowing through the projection pipeline.

pub mod ensemble;
pub mod histogram;
pub mod price_series;
pub mod returns;
pub mod risk_summary;
