//! Shared utilities for CLI commands.

use anyhow::{Context, Result, bail};
use chrono::{Days, Local, NaiveDate};

use dl_core::{Timeline, parse_log};
use dl_db::Database;

/// Parse a log date as `YYYY-MM-DD`, `today` or `yesterday`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_date_from(s, Local::now().date_naive())
}

fn parse_date_from(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    match s.trim() {
        "today" => Ok(today),
        "yesterday" => today
            .checked_sub_days(Days::new(1))
            .context("date out of range"),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").with_context(|| {
            format!("Invalid date: {other}. Use YYYY-MM-DD, 'today' or 'yesterday'")
        }),
    }
}

/// Loads the log for `date` and classifies it with the current rules.
pub fn load_timeline(db: &Database, date: NaiveDate) -> Result<Timeline> {
    let Some(text) = db.get_log(date)? else {
        bail!("no log stored for {date}");
    };
    let rules = db.load_rules().context("failed to load rules")?;
    parse_log(&text, &rules).with_context(|| format!("failed to parse log for {date}"))
}
