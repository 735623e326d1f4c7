//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, CheckFailure, Result};

/// The four consistency stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStage {
    /// Physical line counts match the reference file
    LineCount,
    /// Distinct property counts match the reference file
    KeyCount,
    /// Keys appear in the same positions as in the reference file
    KeyOrder,
    /// Keys and non-blank values carry no surrounding whitespace
    Whitespace,
}

impl CheckStage {
    /// All stages in execution order
    pub const ALL: [CheckStage; 4] = [
        CheckStage::LineCount,
        CheckStage::KeyCount,
        CheckStage::KeyOrder,
        CheckStage::Whitespace,
    ];

    /// Human-readable stage name
    pub fn name(&self) -> &'static str {
        match self {
            CheckStage::LineCount => "line count parity",
            CheckStage::KeyCount => "key count parity",
            CheckStage::KeyOrder => "key order parity",
            CheckStage::Whitespace => "whitespace hygiene",
        }
    }
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How errors outside the four validation failures are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Surface every error to the caller
    #[default]
    Strict,
    /// Log unexpected errors and treat the run as passed
    Lenient,
}

impl FromStr for ErrorPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ErrorPolicy::Strict),
            "lenient" | "ignore" => Ok(ErrorPolicy::Lenient),
            _ => Err(AppError::config(format!("Invalid error policy: {}", s))),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Strict => f.write_str("strict"),
            ErrorPolicy::Lenient => f.write_str("lenient"),
        }
    }
}
