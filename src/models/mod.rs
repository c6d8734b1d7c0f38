//! Data models for configuration and run records

pub mod config;
pub mod metrics;

pub use config::Config;
pub use metrics::RunRecord;
