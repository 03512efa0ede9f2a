//! Styling for report entries and status text.
//!
//! `console` disables colors automatically when the output is not a terminal
//! or `NO_COLOR` is set.

use console::style;

use crate::domain::models::{ExecutionOutcome, ExecutionReport, ExecutionResult};

/// Render one report entry with a colored header line.
///
/// The text is the plain entry with only its first line styled: green for
/// success, red for failures, yellow for invalid expansions.
pub fn styled_result(result: &ExecutionResult) -> String {
    let plain = result.to_string();
    let (header, rest) = plain.split_once('\n').unwrap_or((plain.as_str(), ""));
    let header = match result.outcome() {
        ExecutionOutcome::Succeeded { .. } => style(header).green().bold(),
        ExecutionOutcome::Failed { .. } => style(header).red().bold(),
        ExecutionOutcome::InvalidExpansion { .. } => style(header).yellow(),
    };
    format!("{header}\n{rest}")
}

/// Render a whole report: every entry styled, or the abort reason in red.
pub fn styled_report(report: &ExecutionReport) -> String {
    match report.abort_reason() {
        Some(abort) => format!("{}\n", error_header(&abort.to_string())),
        None => report.results().iter().map(styled_result).collect(),
    }
}

/// Styled label for detail views (bold + dimmed colon).
pub fn label(name: &str) -> String {
    format!("{}{}", style(name).bold(), style(":").dim())
}

/// Section header in the accent color.
pub fn section_header(title: &str) -> String {
    style(title).green().bold().to_string()
}

/// Error header used for aborts.
pub fn error_header(text: &str) -> String {
    style(text).red().bold().to_string()
}
