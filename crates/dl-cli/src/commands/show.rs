//! Show command for printing a classified timeline.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use dl_core::{Timeline, format_clock, format_minutes};
use dl_db::Database;

use super::util::load_timeline;

/// Output format for the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Columns,
}

impl Format {
    pub const fn from_flags(json: bool, columns: bool) -> Self {
        if columns {
            Self::Columns
        } else if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Formats a timeline as a human-readable table.
pub fn format_timeline(date: NaiveDate, timeline: &Timeline) -> String {
    let mut output = String::new();
    writeln!(output, "Timeline for {date}").unwrap();

    if timeline.is_empty() {
        writeln!(output, "No entries.").unwrap();
        return output;
    }

    writeln!(output).unwrap();
    for entry in timeline {
        let row = format!(
            "{}-{}  {:>7}  {:<28}  {}",
            format_clock(entry.start_minutes),
            format_clock(entry.end_minutes),
            format_minutes(entry.duration_minutes),
            entry.label,
            entry.line
        );
        writeln!(output, "{}", row.trim_end()).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Total: {}",
        format_minutes(timeline.total_minutes())
    )
    .unwrap();

    let backwards = timeline.negative_entries().count();
    if backwards > 0 {
        writeln!(
            output,
            "Warning: entries going back in time: {backwards} (out-of-order times or a missing ~)"
        )
        .unwrap();
    }

    output
}

pub fn run<W: Write>(writer: &mut W, db: &Database, date: NaiveDate, format: Format) -> Result<()> {
    let timeline = load_timeline(db, date)?;
    match format {
        Format::Table => write!(writer, "{}", format_timeline(date, &timeline))?,
        Format::Json => writeln!(writer, "{}", serde_json::to_string_pretty(&timeline)?)?,
        Format::Columns => writeln!(
            writer,
            "{}",
            serde_json::to_string_pretty(&timeline.to_columns())?
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 10, 10).unwrap()
    }

    fn seeded_db(text: &str) -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.put_log(day(), text).unwrap();
        db.add_rule("Wake", "Misc").unwrap();
        db.add_rule("Stretch", "Misc").unwrap();
        db.add_rule("Shower", "Activities of Daily Living").unwrap();
        db
    }

    #[test]
    fn show_table_lists_entries() {
        let db = seeded_db("HEADER\n0630 Wake / Stretch\n0645 Shower\n~\n0100 Lunch\n");
        let mut output = Vec::new();
        run(&mut output, &db, day(), Format::Table).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Timeline for 2020-10-10

        00:00-06:30   6h 30m  Misc                          Wake / Stretch
        06:30-06:45      15m  Activities of Daily Living    Shower
        06:45-13:00   6h 15m  Unknown                       Lunch

        Total: 13h 0m
        ");
    }

    #[test]
    fn show_table_warns_about_backwards_times() {
        let db = seeded_db("HEADER\n1100 Shower\n0100 Wake\n");
        let mut output = Vec::new();
        run(&mut output, &db, day(), Format::Table).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("11:00-01:00  -10h 0m  Misc"));
        assert!(output.contains("Warning: entries going back in time: 1 ("));
    }

    #[test]
    fn show_empty_log() {
        let db = seeded_db("HEADER\n\n");
        let mut output = Vec::new();
        run(&mut output, &db, day(), Format::Table).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Timeline for 2020-10-10
        No entries.
        ");
    }

    #[test]
    fn show_json_entries() {
        let db = seeded_db("HEADER\n0630 Wake / Stretch\n");
        let mut output = Vec::new();
        run(&mut output, &db, day(), Format::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["line"], "Wake / Stretch");
        assert_eq!(value[0]["duration_minutes"], 390);
        assert_eq!(value[0]["label"], "Misc");
        assert_eq!(value[0]["tasks"], serde_json::json!(["Wake", "Stretch"]));
    }

    #[test]
    fn show_columns() {
        let db = seeded_db("HEADER\n0630 Wake / Stretch\n0645 Shower / Email\n");
        let mut output = Vec::new();
        run(&mut output, &db, day(), Format::Columns).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "durations": [390, 15],
                "lines": ["Wake / Stretch", "Shower / Email"],
                "line_labels": ["Misc", "Unknown"],
                "tasks": [["Wake", "Stretch"], ["Shower", "Email"]],
                "task_labels": [["Misc", "Misc"], ["Activities of Daily Living", "Unknown"]],
            })
        );
    }

    #[test]
    fn columns_flag_wins_over_json() {
        assert_eq!(Format::from_flags(true, true), Format::Columns);
        assert_eq!(Format::from_flags(true, false), Format::Json);
        assert_eq!(Format::from_flags(false, false), Format::Table);
    }
}
