//! Summary command for per-category day totals.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use dl_core::{DaySummary, format_minutes};
use dl_db::Database;

use super::util::load_timeline;

/// Formats a day summary as a table of AM/PM totals.
pub fn format_summary(date: NaiveDate, summary: &DaySummary) -> String {
    let mut output = String::new();
    writeln!(output, "Summary for {date}").unwrap();
    writeln!(output).unwrap();

    writeln!(
        output,
        "{:<26}  {:>7}  {:>7}  {:>7}",
        "CATEGORY", "AM", "PM", "TOTAL"
    )
    .unwrap();
    for category in &summary.categories {
        writeln!(
            output,
            "{:<26}  {:>7}  {:>7}  {:>7}",
            category.label,
            format_minutes(category.am_minutes),
            format_minutes(category.pm_minutes),
            format_minutes(category.total_minutes)
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "Tracked:   {}", format_minutes(summary.tracked_minutes)).unwrap();
    writeln!(
        output,
        "Untracked: {}",
        format_minutes(summary.untracked_minutes)
    )
    .unwrap();
    if summary.negative_entries > 0 {
        writeln!(
            output,
            "Entries skipped for negative durations: {}",
            summary.negative_entries
        )
        .unwrap();
    }

    output
}

pub fn run<W: Write>(writer: &mut W, db: &Database, date: NaiveDate, json: bool) -> Result<()> {
    let timeline = load_timeline(db, date)?;
    let summary = DaySummary::from_timeline(&timeline);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(date, &summary))?;
    }
    Ok(())
}
