//! Output adapters for a finished run.

use std::fmt::Write;

use crate::error::AppError;
use crate::teammates::{GameCount, HistoryReport};

/// One `"{count} games for {id}"` line per teammate, at most `limit` lines.
pub fn render_lines(teammates: &[GameCount], limit: Option<usize>) -> Vec<String> {
    let take = limit.unwrap_or(teammates.len());
    teammates
        .iter()
        .take(take)
        .map(|entry| format!("{} games for {}", entry.count, entry.id))
        .collect()
}

/// Human readable summary printed by the CLI.
pub fn render_summary(report: &HistoryReport, limit: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Teammates of {} over the last {} days",
        report.account_id, report.window_days
    );
    let stats = &report.stats;
    let _ = writeln!(
        out,
        "{} matches listed, {} counted, {} too short, {} skipped",
        stats.matches_listed,
        stats.matches_counted,
        stats.skipped_short,
        stats.details_unavailable + stats.details_failed
    );
    out.push('\n');

    if report.teammates.is_empty() {
        out.push_str("No teammates found\n");
        return out;
    }

    for line in render_lines(&report.teammates, limit) {
        out.push_str(&line);
        out.push('\n');
    }

    if let Some(limit) = limit
        && report.teammates.len() > limit
    {
        let _ = writeln!(out, "... and {} more", report.teammates.len() - limit);
    }
    out
}

/// Pretty JSON of the whole report, for scripts.
pub fn render_json(report: &HistoryReport) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}
