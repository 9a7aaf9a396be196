//! Status command for showing what the database holds.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use dl_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<()> {
    let dates = db.list_log_dates()?;
    let rules = db.count_rules()?;

    writeln!(writer, "Daily log status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Rules:    {rules}")?;

    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => {
            writeln!(writer, "Logs:     {} ({first} to {last})", dates.len())?;
        }
        _ => writeln!(writer, "No logs imported.")?,
    }

    Ok(())
}
