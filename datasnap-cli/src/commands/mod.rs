//! Subcommand implementations

pub mod anomalies;
pub mod config;
pub mod describe;
