//! Colored formatter implementation with terminal color support
//!
//! Wraps the plain formatter's layout and adds ANSI colors and symbols.

use super::formatter::{format_duration, summary_line, FormattingOptions, OutputFormatter, PlainFormatter};
use crate::{
    error::{AppError, Result},
    models::CheckReport,
};
use colored::*;
use std::fmt::Write as _;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub info: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            info: Color::Cyan,
            muted: Color::BrightBlack,
            border: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            plain_formatter: PlainFormatter::new(options.clone()),
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.options.enable_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn emphasize(&self, text: &str, color: Color) -> String {
        if self.options.enable_color {
            text.bold().color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "═".repeat(title.chars().count() + 4);

        writeln!(output, "{}", self.colorize(&border, self.color_scheme.border))
            .and_then(|_| writeln!(output, "  {}  ", self.emphasize(title, self.color_scheme.header)))
            .and_then(|_| write!(output, "{}", self.colorize(&border, self.color_scheme.border)))
            .map_err(|e| AppError::internal(format!("Failed to format header: {}", e)))?;

        Ok(output)
    }

    fn format_summary(&self, report: &CheckReport) -> Result<String> {
        self.format_success(&summary_line(report))
    }

    fn format_file_table(&self, report: &CheckReport) -> Result<String> {
        let table = self
            .plain_formatter
            .create_table(&self.plain_formatter.file_table_format(), &PlainFormatter::file_rows(report));

        let mut output = format!(
            "{} {}\n",
            self.colorize("Directory:", self.color_scheme.muted),
            self.colorize(&report.directory.display().to_string(), self.color_scheme.info)
        );
        for line in table.lines() {
            if line.starts_with('+') {
                output.push_str(&self.colorize(line, self.color_scheme.border));
            } else {
                output.push_str(line);
            }
            output.push('\n');
        }
        Ok(output.trim_end().to_string())
    }

    fn format_stage_timings(&self, report: &CheckReport) -> Result<String> {
        let mut output = String::new();
        for timing in &report.stages {
            writeln!(
                output,
                "  {} {:<20} {}",
                self.colorize("✓", self.color_scheme.success),
                timing.stage.name(),
                self.colorize(&format_duration(timing.duration), self.color_scheme.muted)
            )
            .map_err(|e| AppError::internal(format!("Failed to format stages: {}", e)))?;
        }
        Ok(output)
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("✅ {}", self.colorize(message, self.color_scheme.success)))
    }
}
