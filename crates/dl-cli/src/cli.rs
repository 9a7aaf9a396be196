//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::util::parse_date;

/// Daily activity log.
///
/// Turns a hand-written daily log into a classified timeline, using rules
/// that map each sub-task to a category.
#[derive(Debug, Parser)]
#[command(name = "dl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show database location and counts.
    Status,

    /// Store the log text for a date.
    Import {
        /// Date of the log (YYYY-MM-DD, today, yesterday).
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// File to read; stdin when omitted.
        file: Option<PathBuf>,
    },

    /// Show the classified timeline for a date.
    Show {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Output entries as JSON.
        #[arg(long)]
        json: bool,

        /// Output one JSON array per field instead of one object per entry.
        #[arg(long)]
        columns: bool,
    },

    /// Show per-category totals split into AM and PM.
    Summary {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List sub-tasks that no rule classifies yet.
    Review {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Manage task rules.
    #[command(subcommand)]
    Rule(RuleAction),
}

/// Rule subcommands.
#[derive(Debug, Subcommand)]
pub enum RuleAction {
    /// Add or update a rule, then re-classify a log.
    Add {
        /// Sub-task text, matched exactly.
        task: String,

        /// Category label (e.g. "School and Work", "Ignore").
        label: String,

        /// Log to re-classify after the update.
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List all rules.
    List,

    /// Remove a rule.
    Remove {
        task: String,
    },
}
