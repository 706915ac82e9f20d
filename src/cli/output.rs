//! Output formatting for CLI commands

use serde::Serialize;

pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints an error message
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {}", message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": message
                    })
                );
            }
        }
    }

    /// Prints a warning (text mode only; JSON callers include warnings in their data)
    pub fn warning(&self, message: &str) {
        if self.format == OutputFormat::Text {
            eprintln!("Warning: {}", message);
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Fallback for commands without a text layout
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints a line of text (text only, ignored in JSON mode)
    pub fn text(&self, message: &str) {
        if self.format == OutputFormat::Text {
            println!("{}", message);
        }
    }

    /// Prints a table row (text only, ignored in JSON mode)
    ///
    /// Each column except the last is left-aligned to its width in `widths`.
    pub fn row(&self, widths: &[usize], columns: &[&str]) {
        if self.format == OutputFormat::Text {
            println!("{}", format_row(widths, columns));
        }
    }

    /// Prints a horizontal rule under a table header (text only)
    pub fn rule(&self, width: usize) {
        if self.format == OutputFormat::Text {
            println!("{}", "-".repeat(width));
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

fn format_row(widths: &[usize], columns: &[&str]) -> String {
    let last = columns.len().saturating_sub(1);
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| match widths.get(i) {
            Some(&width) if i < last => format!("{:<width$}", column, width = width),
            _ => column.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
