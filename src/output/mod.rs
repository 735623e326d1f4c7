//! Output formatting and display system
//!
//! Renders the result of a check for the terminal (colored or plain) or as
//! JSON for scripts.

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{Alignment, Column, FormattingOptions, OutputFormatter, PlainFormatter, RowData, TableFormat};

use crate::{
    cli::OutputFormat,
    error::{AppError, Result},
    models::CheckReport,
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            ..FormattingOptions::default()
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// Main output coordinator that handles all result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
    format: OutputFormat,
    verbose: bool,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn OutputFormatter>, format: OutputFormat, verbose: bool) -> Self {
        Self { formatter, format, verbose }
    }

    /// Coordinator for the given display settings
    pub fn for_settings(enable_color: bool, verbose: bool, format: OutputFormat) -> Self {
        Self::new(OutputFormatterFactory::create_formatter(enable_color), format, verbose)
    }

    /// Render a passing report
    pub fn display_report(&self, report: &CheckReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return report
                .to_json()
                .map_err(|e| AppError::internal(format!("Failed to serialize report: {}", e)));
        }

        if !self.verbose {
            return self.formatter.format_summary(report);
        }

        let mut output = String::new();
        output.push_str(&self.formatter.format_header("Environment Config Check")?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_file_table(report)?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_stage_timings(report)?);
        output.push('\n');
        output.push_str(&self.formatter.format_summary(report)?);
        Ok(output)
    }
}
