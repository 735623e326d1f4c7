//! Structured logging for the environment config checker
//!
//! This module provides:
//! - Leveled logging with console, JSON and compact output formats
//! - A per-run session ID attached to every entry
//! - Structured key/value fields serialized with serde_json
//! - Format selection through `--log-format`
//! - A `CheckLogger` that records stage progress and failures
//!
//! All entries go to stderr so stdout only ever carries the check report.

use crate::error::{AppError, CheckFailure, Result};
use crate::models::CheckConfig;
use crate::types::CheckStage;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Trace level - most detailed
    Trace = 0,
    /// Debug level - detailed information for debugging
    Debug = 1,
    /// Info level - general application information
    Info = 2,
    /// Warning level - potentially harmful situations
    Warn = 3,
    /// Error level - error events
    Error = 4,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn colored(&self) -> String {
        let padded = format!("{:>5}", self.as_str());
        match self {
            LogLevel::Trace => padded.white().to_string(),
            LogLevel::Debug => padded.cyan().to_string(),
            LogLevel::Info => padded.green().to_string(),
            LogLevel::Warn => padded.yellow().to_string(),
            LogLevel::Error => padded.red().to_string(),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::config(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when log entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console format
    #[default]
    Console,
    /// JSON format for structured logging
    Json,
    /// Compact single-line format
    Compact,
}

/// Shared logging context
#[derive(Debug, Default)]
struct LogContext {
    session_id: Option<String>,
}

/// Logger implementation with multiple output formats
#[derive(Debug, Clone)]
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a logger whose level and format follow the run configuration
    pub fn with_config(name: impl Into<String>, config: &CheckConfig) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: config.log_format,
            name: name.into(),
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Output format in use
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Set session correlation ID
    pub fn set_session_id(&self, session_id: String) {
        if let Ok(mut context) = self.context.write() {
            context.session_id = Some(session_id);
        }
    }

    /// Session ID, if one was set
    pub fn session_id(&self) -> Option<String> {
        self.context.read().ok().and_then(|c| c.session_id.clone())
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Attach the session ID and render the entry in the configured format
    fn render(&self, mut entry: LogEntry) -> String {
        if let Some(session_id) = self.session_id() {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id));
        }

        match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
            LogFormat::Compact => self.format_compact(&entry),
        }
    }

    /// Format log entry for console output
    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");

        let formatted_level = if self.use_color {
            entry.level.colored()
        } else {
            format!("{:>5}", entry.level.as_str())
        };

        let mut output = format!("{} {} [{}] {}", timestamp, formatted_level, entry.logger, entry.message);

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry.fields.iter()
                .filter(|(k, _)| k.as_str() != "session_id")
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            if !fields.is_empty() {
                output.push_str(&format!(" {{{}}}", fields.join(", ")));
            }
        }

        output
    }

    /// Format log entry as JSON
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }

    /// Format log entry in compact format
    fn format_compact(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%H:%M:%S");
        format!("{} {} {}: {}",
            timestamp,
            entry.level.as_str().chars().next().unwrap_or('?'),
            entry.logger,
            entry.message
        )
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                fields: HashMap::new(),
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add a duration field in milliseconds
    pub fn duration(self, key: &str, duration: Duration) -> Self {
        self.field(key, duration.as_secs_f64() * 1000.0)
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_fatal", error.is_fatal())
            .field("error_exit_code", error.exit_code())
    }

    /// Render without writing
    pub fn render(self) -> String {
        self.logger.render(self.entry)
    }

    /// Finalize and write the log entry to stderr
    pub fn log(self) {
        if !self.logger.would_log(self.entry.level) {
            return;
        }
        let output = self.render();
        let _ = writeln!(io::stderr(), "{}", output);
    }
}

/// Logger for consistency check progress
#[derive(Debug, Clone)]
pub struct CheckLogger {
    logger: Logger,
}

impl CheckLogger {
    /// Create a check logger with a fresh session ID
    pub fn new(config: &CheckConfig) -> Self {
        let logger = Logger::with_config("CHECK", config);
        logger.set_session_id(Uuid::new_v4().to_string());
        Self { logger }
    }

    /// Underlying logger
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Log the files a pass will compare
    pub fn log_discovered(&self, directory: &Path, files: &[String]) {
        self.logger.info(&format!("Discovered {} environment config file(s) in {}", files.len(), directory.display()))
            .field("directory", directory.display().to_string())
            .field("files", files)
            .log();
    }

    /// Log a parsed file
    pub fn log_file_parsed(&self, name: &str, line_count: usize, property_count: usize) {
        self.logger.debug(&format!("Parsed {}", name))
            .field("file", name)
            .field("line_count", line_count)
            .field("property_count", property_count)
            .log();
    }

    pub fn log_stage_started(&self, stage: CheckStage) {
        self.logger.debug(&format!("Checking {}", stage))
            .field("stage", stage)
            .log();
    }

    pub fn log_stage_passed(&self, stage: CheckStage, duration: Duration) {
        self.logger.debug(&format!("Passed {}", stage))
            .field("stage", stage)
            .duration("duration_ms", duration)
            .log();
    }

    /// Log a failed stage; unparseable failures also carry their hidden cause
    pub fn log_stage_failed(&self, stage: Option<CheckStage>, failure: &CheckFailure) {
        let mut builder = self.logger.info(&failure.to_string())
            .field("failure", failure.kind());

        if let Some(stage) = stage {
            builder = builder.field("stage", stage);
        }
        if let Some(key) = failure.key() {
            builder = builder.field("key", key);
        }
        if let CheckFailure::Unparseable { cause } = failure {
            builder = builder.field("cause", cause);
        }

        builder.log();
    }

    /// Log an unexpected error that the lenient policy swallowed
    pub fn log_error_ignored(&self, error: &AppError) {
        self.logger.warn(&format!("Environment config check hit an error, but ignored it: {}", error))
            .error_info(error)
            .log();
    }

    /// Log the end of a successful pass
    pub fn log_passed(&self, file_count: usize, elapsed: Duration) {
        self.logger.info(&format!("All {} environment config file(s) are consistent", file_count))
            .field("file_count", file_count)
            .duration("elapsed_ms", elapsed)
            .log();
    }
}
