//! Review command for listing unclassified sub-tasks.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use dl_core::Timeline;
use dl_db::Database;

use super::util::load_timeline;

/// Writes the review queue of a timeline.
pub fn write_queue<W: Write>(writer: &mut W, timeline: &Timeline) -> Result<()> {
    let unknown = timeline.unknown_tasks();
    if unknown.is_empty() {
        writeln!(writer, "All tasks are classified.")?;
        return Ok(());
    }

    writeln!(writer, "Unclassified tasks ({}):", unknown.len())?;
    for task in unknown {
        if task.is_empty() {
            writeln!(writer, "  (empty)")?;
        } else {
            writeln!(writer, "  {task}")?;
        }
    }
    writeln!(writer)?;
    writeln!(writer, "Tip: Run 'dl rule add <TASK> <LABEL>' to classify")?;
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, db: &Database, date: NaiveDate) -> Result<()> {
    let timeline = load_timeline(db, date)?;
    write_queue(writer, &timeline)
}
