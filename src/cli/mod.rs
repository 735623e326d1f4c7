//! Command-line interface module with topic help

pub mod help;

pub use help::HelpSystem;

use crate::{logging::LogFormat, types::ErrorPolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Format of the report printed after a passing check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Environment Config Check - verify per-environment property files stay in step
#[derive(Parser, Debug, Clone)]
#[command(name = "env-config-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project source directory; files are read from its sibling `resources`
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory to scan directly, overriding --source-dir
    #[arg(long, value_name = "DIR")]
    pub resource_dir: Option<PathBuf>,

    /// File name pattern, `*` matches one or more non-whitespace characters
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// How errors other than validation failures are treated
    #[arg(long, value_enum, value_name = "POLICY")]
    pub error_policy: Option<ErrorPolicy>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Format of log lines on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Console)]
    pub log_format: LogFormat,

    /// Show help for a topic (patterns, stages, env, exit-codes, examples), or an overview without one
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<Option<String>>,

    /// Write an example .env file to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub init_env: Option<PathBuf>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref pattern) = self.pattern {
            if pattern.trim().is_empty() {
                return Err("--pattern cannot be empty".to_string());
            }
        }

        if self.format == OutputFormat::Json && self.verbose {
            return Err("--verbose cannot be combined with --format json".to_string());
        }

        Ok(())
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        !self.no_color && supports_color()
    }

    /// Display help for the specified topic or main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        match self.help_topic.as_ref().and_then(Option::as_ref) {
            Some(topic) => help_system.display_topic_help(topic, use_colors).unwrap_or_else(|| {
                format!(
                    "Unknown help topic: '{}'\n\nAvailable topics: {}\n",
                    topic,
                    HelpSystem::TOPICS.join(", ")
                )
            }),
            None => help_system.display_main_help(use_colors),
        }
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    cfg!(unix)
}
