//! Small helpers shared by every crate in the workspace: environment access
//! and TOML configuration loading.

pub mod config;
pub mod env;
