//! Report produced by a successful check

use crate::types::CheckStage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Per-file facts gathered during a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// File name without directory
    pub name: String,
    /// Physical line count
    pub line_count: usize,
    /// Distinct property count
    pub property_count: usize,
}

/// Time spent in one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: CheckStage,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

/// Result of a check in which every stage passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Directory the files were discovered in
    pub directory: PathBuf,
    /// Files in comparison order; the first is the reference
    pub files: Vec<FileSummary>,
    /// Stages that ran, in order
    pub stages: Vec<StageTiming>,
    /// Wall time of the whole pass
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl CheckReport {
    /// Create an empty report for `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            files: Vec::new(),
            stages: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Reference file summary
    pub fn reference(&self) -> Option<&FileSummary> {
        self.files.first()
    }

    /// Number of checked files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Properties declared by every file
    pub fn property_count(&self) -> usize {
        self.reference().map(|f| f.property_count).unwrap_or(0)
    }

    /// Elapsed time in whole milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Record a finished stage
    pub fn record_stage(&mut self, stage: CheckStage, duration: Duration) {
        self.stages.push(StageTiming { stage, duration });
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Durations as fractional milliseconds
mod duration_ms {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_nanos() as f64 / 1_000_000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(ms / 1000.0)
            .map_err(|e| D::Error::custom(format!("invalid duration {} ms: {}", ms, e)))
    }
}
