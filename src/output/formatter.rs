//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! a plain text implementation with table formatting capabilities.

use crate::{
    error::{AppError, Result},
    models::CheckReport,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// One-line pass summary with elapsed time
    fn format_summary(&self, report: &CheckReport) -> Result<String>;

    /// Per-file line and property counts as a table
    fn format_file_table(&self, report: &CheckReport) -> Result<String>;

    /// Time spent per stage
    fn format_stage_timings(&self, report: &CheckReport) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Show table borders
    pub table_borders: bool,
    /// Maximum column width
    pub max_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            table_borders: true,
            max_width: 120,
        }
    }
}

/// Table formatting configuration
#[derive(Debug, Clone)]
pub struct TableFormat {
    /// Column definitions
    pub columns: Vec<Column>,
    /// Show borders around table
    pub show_borders: bool,
    /// Show header row
    pub show_header: bool,
}

/// Column definition for table formatting
#[derive(Debug, Clone)]
pub struct Column {
    /// Column header
    pub header: String,
    /// Column alignment
    pub alignment: Alignment,
    /// Minimum width
    pub min_width: usize,
    /// Maximum width
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, alignment: Alignment, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            alignment,
            min_width: header.len(),
            max_width,
        }
    }
}

/// Text alignment options
#[derive(Debug, Clone)]
pub enum Alignment {
    Left,
    Right,
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Table layout for the per-file summary
    pub(crate) fn file_table_format(&self) -> TableFormat {
        TableFormat {
            columns: vec![
                Column::new("File", Alignment::Left, self.options.max_width),
                Column::new("Lines", Alignment::Right, 12),
                Column::new("Properties", Alignment::Right, 12),
            ],
            show_borders: self.options.table_borders,
            show_header: true,
        }
    }

    /// Rows for the per-file summary, reference file marked
    pub(crate) fn file_rows(report: &CheckReport) -> Vec<RowData> {
        report
            .files
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let name = if i == 0 { format!("{} (reference)", file.name) } else { file.name.clone() };
                vec![name, file.line_count.to_string(), file.property_count.to_string()]
            })
            .collect()
    }

    /// Create a table with the given format and data
    pub(crate) fn create_table(&self, format: &TableFormat, rows: &[RowData]) -> String {
        if rows.is_empty() {
            return String::new();
        }

        let column_widths = self.calculate_column_widths(format, rows);
        let mut output = String::new();

        if format.show_header && !format.columns.is_empty() {
            if format.show_borders {
                output.push_str(&self.create_horizontal_border(&column_widths));
                output.push('\n');
            }

            let headers: Vec<String> = format.columns.iter().map(|c| c.header.clone()).collect();
            output.push_str(&self.create_row(&headers, &column_widths, format));
            output.push('\n');

            if format.show_borders {
                output.push_str(&self.create_horizontal_border(&column_widths));
                output.push('\n');
            }
        }

        for row in rows {
            output.push_str(&self.create_row(row, &column_widths, format));
            output.push('\n');
        }

        if format.show_borders {
            output.push_str(&self.create_horizontal_border(&column_widths));
        }

        output
    }

    fn calculate_column_widths(&self, format: &TableFormat, rows: &[RowData]) -> Vec<usize> {
        format
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let content = rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                content.max(column.min_width).min(column.max_width)
            })
            .collect()
    }

    fn create_row(&self, data: &[String], widths: &[usize], format: &TableFormat) -> String {
        let mut row = String::new();

        if format.show_borders {
            row.push('|');
        }

        for ((cell, &width), column) in data.iter().zip(widths).zip(&format.columns) {
            let padded_cell = self.align_text(cell, width, &column.alignment);

            if format.show_borders {
                row.push(' ');
            }
            row.push_str(&padded_cell);
            if format.show_borders {
                row.push_str(" |");
            } else {
                row.push_str("  ");
            }
        }

        row.trim_end().to_string()
    }

    fn create_horizontal_border(&self, widths: &[usize]) -> String {
        let mut border = String::new();

        if !widths.is_empty() {
            border.push('+');
            for &width in widths {
                border.push_str(&"-".repeat(width + 2));
                border.push('+');
            }
        }

        border
    }

    /// Align text within specified width
    fn align_text(&self, text: &str, width: usize, alignment: &Alignment) -> String {
        let len = text.chars().count();
        if len >= width {
            return text.chars().take(width).collect();
        }

        let padding = " ".repeat(width - len);
        match alignment {
            Alignment::Left => format!("{}{}", text, padding),
            Alignment::Right => format!("{}{}", padding, text),
        }
    }
}

/// Format duration in human-readable format
pub(crate) fn format_duration(duration: Duration) -> String {
    let duration_ms = duration.as_secs_f64() * 1000.0;
    if duration_ms < 1.0 {
        format!("{:.2}μs", duration_ms * 1000.0)
    } else if duration_ms < 1000.0 {
        format!("{:.1}ms", duration_ms)
    } else {
        format!("{:.2}s", duration_ms / 1000.0)
    }
}

/// Pass summary shared by both formatters
pub(crate) fn summary_line(report: &CheckReport) -> String {
    format!(
        "Environment config files are consistent: {} files, {} properties ({} ms)",
        report.file_count(),
        report.property_count(),
        report.elapsed_ms()
    )
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(title.len() + 4);

        writeln!(output, "{}", border)
            .and_then(|_| writeln!(output, "  {}  ", title))
            .and_then(|_| write!(output, "{}", border))
            .map_err(|e| AppError::internal(format!("Failed to format header: {}", e)))?;

        Ok(output)
    }

    fn format_summary(&self, report: &CheckReport) -> Result<String> {
        self.format_success(&summary_line(report))
    }

    fn format_file_table(&self, report: &CheckReport) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Directory: {}", report.directory.display())
            .map_err(|e| AppError::internal(format!("Failed to format file table: {}", e)))?;
        output.push_str(&self.create_table(&self.file_table_format(), &Self::file_rows(report)));
        Ok(output)
    }

    fn format_stage_timings(&self, report: &CheckReport) -> Result<String> {
        let mut output = String::new();
        for timing in &report.stages {
            writeln!(output, "  {:<20} passed in {}", timing.stage.name(), format_duration(timing.duration))
                .map_err(|e| AppError::internal(format!("Failed to format stages: {}", e)))?;
        }
        Ok(output)
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("SUCCESS: {}", message))
    }
}
