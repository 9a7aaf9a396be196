//! Import command for storing a day's log text.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use dl_core::parse_log;
use dl_db::Database;

/// Reads the log from `file`, or from `stdin` when no file is given.
pub fn read_source<R: Read>(file: Option<&Path>, mut stdin: R) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("failed to read log from stdin")?;
    Ok(text)
}

/// Validates and stores the log text for `date`.
///
/// The log is parsed with the current rules first so a malformed log is
/// never stored.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, date: NaiveDate, text: &str) -> Result<()> {
    let rules = db.load_rules().context("failed to load rules")?;
    let timeline =
        parse_log(text, &rules).with_context(|| format!("refusing to import log for {date}"))?;

    db.put_log(date, text)
        .with_context(|| format!("failed to store log for {date}"))?;

    let unknown = timeline.unknown_tasks().len();
    writeln!(
        writer,
        "Imported {} entries for {date} ({unknown} unclassified tasks)",
        timeline.len()
    )?;
    Ok(())
}
