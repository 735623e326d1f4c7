//! Data models for the environment config checker

pub mod config;
pub mod report;

pub use config::CheckConfig;
pub use report::{CheckReport, FileSummary, StageTiming};
