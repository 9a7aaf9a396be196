//! Rule commands for curating the task → category mapping.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use dl_core::Category;
use dl_db::Database;

use super::review::write_queue;
use super::util::load_timeline;

/// Adds or updates a rule.
///
/// With a `date`, that day's log is classified again from scratch with the
/// updated rules and the remaining review queue is printed.
pub fn add<W: Write>(
    writer: &mut W,
    db: &mut Database,
    task: &str,
    label: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let previous = db.add_rule(task, label).context("failed to store rule")?;
    let task = task.trim();
    let label = Category::parse(label);

    match previous {
        Some(old) if old == label => writeln!(writer, "Rule unchanged: {task} -> {label}")?,
        Some(old) => writeln!(writer, "Updated rule: {task}: {old} -> {label}")?,
        None => writeln!(writer, "Added rule: {task} -> {label}")?,
    }

    if let Some(date) = date {
        let timeline = load_timeline(db, date)?;
        writeln!(writer)?;
        write_queue(writer, &timeline)?;
    }
    Ok(())
}

pub fn list<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let rules = db.list_rules()?;
    if rules.is_empty() {
        writeln!(writer, "No rules defined.")?;
        return Ok(());
    }

    let width = rules.iter().map(|r| r.task.chars().count()).max().unwrap_or(0);
    for rule in rules {
        writeln!(writer, "{:<width$}  {}", rule.task, rule.label)?;
    }
    Ok(())
}

pub fn remove<W: Write>(writer: &mut W, db: &mut Database, task: &str) -> Result<()> {
    if !db.remove_rule(task)? {
        bail!("rule not found: {}", task.trim());
    }
    writeln!(writer, "Removed rule: {}", task.trim())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 10, 10).unwrap()
    }

    #[test]
    fn add_reports_new_and_updated_rules() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        add(&mut output, &mut db, "Read", "Personal Enjoyment", None).unwrap();
        add(&mut output, &mut db, " Read ", "Personal Development", None).unwrap();
        add(&mut output, &mut db, "Read", "Personal Development", None).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Added rule: Read -> Personal Enjoyment
        Updated rule: Read: Personal Enjoyment -> Personal Development
        Rule unchanged: Read -> Personal Development
        ");
    }

    #[test]
    fn add_with_date_reclassifies_log() {
        let mut db = Database::open_in_memory().unwrap();
        db.put_log(day(), "HEADER\n0630 Wake / Stretch\n0645 Shower\n")
            .unwrap();
        db.add_rule("Wake", "Misc").unwrap();

        let mut output = Vec::new();
        add(&mut output, &mut db, "Stretch", "Misc", Some(day())).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Added rule: Stretch -> Misc

        Unclassified tasks (1):
          Shower

        Tip: Run 'dl rule add <TASK> <LABEL>' to classify
        ");
    }

    #[test]
    fn add_rejects_blank_label() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        let err = add(&mut output, &mut db, "Wake", "  ", None).unwrap_err();
        assert_eq!(format!("{err:#}"), "failed to store rule: rule label cannot be empty");
        assert!(output.is_empty());
    }

    #[test]
    fn list_aligns_labels() {
        let mut db = Database::open_in_memory().unwrap();
        db.add_rule("Wake", "Misc").unwrap();
        db.add_rule("Shower", "Activities of Daily Living").unwrap();
        db.add_rule("Commute", "Ignore").unwrap();

        let mut output = Vec::new();
        list(&mut output, &db).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Commute  Ignore
        Shower   Activities of Daily Living
        Wake     Misc
        ");
    }

    #[test]
    fn list_without_rules() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        list(&mut output, &db).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @"No rules defined.");
    }

    #[test]
    fn remove_missing_rule_fails() {
        let mut db = Database::open_in_memory().unwrap();
        db.add_rule("Wake", "Misc").unwrap();
        let mut output = Vec::new();

        remove(&mut output, &mut db, "Wake").unwrap();
        let err = remove(&mut output, &mut db, "Wake").unwrap_err();

        assert_eq!(err.to_string(), "rule not found: Wake");
        assert_eq!(String::from_utf8(output).unwrap(), "Removed rule: Wake\n");
    }
}
