//! Consistency checker
//!
//! Runs discovery, line counting, parsing and the four comparison stages in
//! strict order and stops at the first failure. Discovery and parse problems
//! surface as [`CheckFailure::Unparseable`]; anything else that goes wrong is
//! an [`AppError`] the caller's [`ErrorPolicy`] decides about.

pub mod stages;

pub use stages::{check_key_counts, check_key_order, check_line_counts, check_whitespace, StageResult};

use crate::{
    discovery::{discover, display_name, ConfigFileSet},
    error::{AppError, CheckFailure, Result},
    line_counter::count_lines,
    logging::CheckLogger,
    models::{CheckConfig, CheckReport, FileSummary},
    properties::OrderedProperties,
    types::{CheckStage, ErrorPolicy},
};
use std::path::Path;
use std::time::Instant;

/// Result of one check pass
#[derive(Debug)]
pub enum CheckOutcome {
    /// Every stage passed
    Consistent(CheckReport),
    /// A stage failed; this is the fatal kind
    Inconsistent(CheckFailure),
    /// Something other than a validation failure went wrong
    Errored(AppError),
}

impl CheckOutcome {
    pub fn is_consistent(&self) -> bool {
        matches!(self, CheckOutcome::Consistent(_))
    }

    /// Report of a consistent pass
    pub fn report(&self) -> Option<&CheckReport> {
        match self {
            CheckOutcome::Consistent(report) => Some(report),
            _ => None,
        }
    }

    /// Failure of an inconsistent pass
    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            CheckOutcome::Inconsistent(failure) => Some(failure),
            _ => None,
        }
    }

    /// Apply `policy` to the outcome
    ///
    /// Validation failures are always errors. Other errors are returned under
    /// [`ErrorPolicy::Strict`] and become `Ok(None)` under
    /// [`ErrorPolicy::Lenient`].
    pub fn into_result(self, policy: ErrorPolicy) -> Result<Option<CheckReport>> {
        match self {
            CheckOutcome::Consistent(report) => Ok(Some(report)),
            CheckOutcome::Inconsistent(failure) => Err(AppError::Check(failure)),
            CheckOutcome::Errored(error) => match policy {
                ErrorPolicy::Strict => Err(error),
                ErrorPolicy::Lenient => Ok(None),
            },
        }
    }
}

impl From<Result<CheckReport>> for CheckOutcome {
    fn from(result: Result<CheckReport>) -> Self {
        match result {
            Ok(report) => CheckOutcome::Consistent(report),
            Err(AppError::Check(failure)) => CheckOutcome::Inconsistent(failure),
            Err(error) => CheckOutcome::Errored(error),
        }
    }
}

/// Orchestrates one validation pass over the configured directory
pub struct ConsistencyChecker {
    config: CheckConfig,
    logger: CheckLogger,
}

impl ConsistencyChecker {
    /// Create a checker with a logger derived from `config`
    pub fn new(config: CheckConfig) -> Self {
        let logger = CheckLogger::new(&config);
        Self { config, logger }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run the full check and apply the configured error policy
    ///
    /// `Ok(None)` means an unexpected error was ignored under the lenient
    /// policy.
    pub fn execute(&self) -> Result<Option<CheckReport>> {
        let outcome = self.run();
        if let CheckOutcome::Errored(error) = &outcome {
            if self.config.error_policy == ErrorPolicy::Lenient {
                self.logger.log_error_ignored(error);
            }
        }
        outcome.into_result(self.config.error_policy)
    }

    /// Run the full check as an explicit outcome
    pub fn run(&self) -> CheckOutcome {
        CheckOutcome::from(self.check())
    }

    /// Discover the files and run every stage
    pub fn check(&self) -> Result<CheckReport> {
        let start = Instant::now();
        let directory = self.config.scan_directory()?;
        let pattern = self.config.pattern()?;

        let files = discover(&directory, &pattern).map_err(|e| self.unparseable(e))?;
        let mut report = self.check_files(&files)?;

        report.elapsed = start.elapsed();
        self.logger.log_passed(report.file_count(), report.elapsed);
        Ok(report)
    }

    /// Run every stage over an already discovered file set
    pub fn check_files(&self, files: &ConfigFileSet) -> Result<CheckReport> {
        let start = Instant::now();
        let mut report = CheckReport::new(files.directory());
        let names: Vec<String> = files.iter().map(|path| display_name(path)).collect();
        self.logger.log_discovered(files.directory(), &names);

        let line_counts: Vec<(String, usize)> = files
            .iter()
            .zip(&names)
            .map(|(path, name)| (name.clone(), count_lines(path)))
            .collect();
        self.run_stage(&mut report, CheckStage::LineCount, || check_line_counts(&line_counts))?;

        let mut parsed = Vec::with_capacity(files.len());
        for ((path, name), (_, line_count)) in files.iter().zip(&names).zip(&line_counts) {
            let properties = self.parse(path)?;
            self.logger.log_file_parsed(name, *line_count, properties.len());
            report.files.push(FileSummary {
                name: name.clone(),
                line_count: *line_count,
                property_count: properties.len(),
            });
            parsed.push(properties);
        }

        self.run_stage(&mut report, CheckStage::KeyCount, || check_key_counts(&parsed))?;
        self.run_stage(&mut report, CheckStage::KeyOrder, || check_key_order(&parsed))?;
        self.run_stage(&mut report, CheckStage::Whitespace, || check_whitespace(&parsed))?;

        report.elapsed = start.elapsed();
        Ok(report)
    }

    fn parse(&self, path: &Path) -> Result<OrderedProperties> {
        OrderedProperties::from_path(path).map_err(|e| self.unparseable(e))
    }

    fn run_stage<F>(&self, report: &mut CheckReport, stage: CheckStage, check: F) -> Result<()>
    where
        F: FnOnce() -> StageResult,
    {
        self.logger.log_stage_started(stage);
        let start = Instant::now();

        match check() {
            Ok(()) => {
                let duration = start.elapsed();
                self.logger.log_stage_passed(stage, duration);
                report.record_stage(stage, duration);
                Ok(())
            }
            Err(failure) => {
                self.logger.log_stage_failed(Some(stage), &failure);
                Err(AppError::Check(failure))
            }
        }
    }

    /// Normalize a discovery or parse error into the generic fatal failure
    fn unparseable(&self, error: AppError) -> AppError {
        let error = error.normalize();
        if let Some(failure) = error.as_check_failure() {
            self.logger.log_stage_failed(None, failure);
        }
        error
    }
}

/// Check the files in `directory` matching `pattern` with default settings
pub fn check_directory(directory: &Path, pattern: Option<&str>) -> Result<CheckReport> {
    let mut config = CheckConfig::for_directory(directory);
    config.file_pattern = pattern.map(str::to_string);
    ConsistencyChecker::new(config).check()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_identical_files_pass() {
        let dir = fixture(&[
            ("env-config-dev.properties", "a=1\nb=2\n"),
            ("env-config-prod.properties", "a=1\nb=2\n"),
        ]);

        let report = check_directory(dir.path(), None).unwrap();
        assert_eq!(report.file_count(), 2);
        assert_eq!(report.property_count(), 2);
        assert_eq!(report.stages.len(), 4);
        assert_eq!(report.files[0].line_count, 3);
    }

    #[test]
    fn test_single_file_passes() {
        let dir = fixture(&[("env-config-dev.properties", "a=1\n")]);
        assert!(check_directory(dir.path(), None).is_ok());
    }

    #[test]
    fn test_reordered_keys_fail_on_first_key() {
        let dir = fixture(&[
            ("env-config-dev.properties", "a=1\nb=2\n"),
            ("env-config-prod.properties", "b=2\na=1\n"),
        ]);

        let err = check_directory(dir.path(), None).unwrap_err();
        assert_eq!(
            err.as_check_failure(),
            Some(&CheckFailure::KeyOrderMismatch { key: "a".to_string() })
        );
    }

    #[test]
    fn test_whitespace_in_key_fails() {
        let dir = fixture(&[
            ("env-config-dev.properties", "a=1\n"),
            ("env-config-prod.properties", "a =1\n"),
        ]);

        let err = check_directory(dir.path(), None).unwrap_err();
        assert_eq!(
            err.as_check_failure(),
            Some(&CheckFailure::WhitespaceViolation { key: "a".to_string(), value: None })
        );
    }

    #[test]
    fn test_line_count_mismatch() {
        let dir = fixture(&[
            ("env-config-dev.properties", "a=1\nb=2\n"),
            ("env-config-prod.properties", "a=1\n\nb=2\n"),
        ]);

        let err = check_directory(dir.path(), None).unwrap_err();
        assert_eq!(
            err.as_check_failure(),
            Some(&CheckFailure::LineCountMismatch {
                reference: "env-config-dev.properties".to_string(),
                other: "env-config-prod.properties".to_string(),
            })
        );
    }

    #[test]
    fn test_key_count_mismatch() {
        let dir = fixture(&[
            ("env-config-dev.properties", "a=1\nb=2\n"),
            ("env-config-prod.properties", "a=1\n# b\n"),
        ]);

        let err = check_directory(dir.path(), None).unwrap_err();
        assert_eq!(err.as_check_failure(), Some(&CheckFailure::KeyCountMismatch));
    }

    #[test]
    fn test_no_files_is_unparseable() {
        let dir = fixture(&[("application.properties", "a=1\n")]);

        let outcome = ConsistencyChecker::new(CheckConfig::for_directory(dir.path())).run();
        assert!(matches!(outcome.failure(), Some(CheckFailure::Unparseable { .. })));
    }

    #[test]
    fn test_malformed_file_is_unparseable() {
        let dir = fixture(&[
            ("env-config-dev.properties", "a=\\u00zz\n"),
            ("env-config-prod.properties", "a=1\n"),
        ]);

        let err = check_directory(dir.path(), None).unwrap_err();
        assert_eq!(err.to_string(), "Check failed: Cannot parse environment configuration files");
    }

    #[test]
    fn test_invalid_pattern_is_errored() {
        let dir = fixture(&[("env-config-dev.properties", "a=1\n")]);
        let mut config = CheckConfig::for_directory(dir.path());
        config.file_pattern = Some("env-(*".to_string());

        let outcome = ConsistencyChecker::new(config).run();
        assert!(matches!(outcome, CheckOutcome::Errored(AppError::Config(_))));
    }

    #[test]
    fn test_lenient_policy_ignores_unexpected_errors() {
        let dir = fixture(&[("env-config-dev.properties", "a=1\n")]);
        let mut config = CheckConfig::for_directory(dir.path());
        config.file_pattern = Some("env-(*".to_string());
        config.error_policy = ErrorPolicy::Lenient;

        assert!(matches!(ConsistencyChecker::new(config.clone()).execute(), Ok(None)));

        config.error_policy = ErrorPolicy::Strict;
        assert!(ConsistencyChecker::new(config).execute().is_err());
    }

    #[test]
    fn test_lenient_policy_keeps_validation_failures() {
        let dir = fixture(&[
            ("env-config-dev.properties", "a=1\nb=2\n"),
            ("env-config-prod.properties", "b=2\na=1\n"),
        ]);
        let mut config = CheckConfig::for_directory(dir.path());
        config.error_policy = ErrorPolicy::Lenient;

        let err = ConsistencyChecker::new(config).execute().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_outcome_conversions() {
        let consistent = CheckOutcome::from(Ok(CheckReport::new("/tmp")));
        assert!(consistent.is_consistent());
        assert!(consistent.report().is_some());

        let inconsistent = CheckOutcome::from(Err(AppError::from(CheckFailure::KeyCountMismatch)));
        assert_eq!(inconsistent.failure(), Some(&CheckFailure::KeyCountMismatch));
        assert!(inconsistent.into_result(ErrorPolicy::Lenient).is_err());

        let errored = CheckOutcome::from(Err(AppError::io("disk on fire")));
        assert!(errored.report().is_none());
        assert!(matches!(errored.into_result(ErrorPolicy::Lenient), Ok(None)));
    }
}
