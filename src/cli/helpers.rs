//! Shared helper functions for CLI commands

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Read;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::schema::ValidationIssue;

/// The local calendar day validation runs against
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The output format after applying `default_format` from the config
///
/// An explicit `--format` always wins; an unrecognised config value is
/// ignored.
pub fn effective_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    match config.default_format.as_deref() {
        Some(name) => OutputFormat::from_str(name, true).unwrap_or_else(|_| {
            tracing::warn!(format = name, "ignoring unknown default_format");
            OutputFormat::Auto
        }),
        None => OutputFormat::Auto,
    }
}

/// A link given on the command line, or read from stdin for `-`
pub fn read_link(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
        Ok(buf.trim().to_string())
    } else {
        Ok(arg.trim().to_string())
    }
}

/// Print non-blocking findings to stderr
pub fn print_warnings(warnings: &[ValidationIssue]) {
    for warning in warnings {
        eprintln!(
            "{} {} {}",
            style("!").yellow(),
            style(&warning.field).dim(),
            style(&warning.message).yellow()
        );
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
