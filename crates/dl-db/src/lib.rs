//! Storage layer for daily logs and task rules.
//!
//! Provides persistence for raw log text (keyed by calendar date) and the
//! task → category mapping using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared across
//! threads without external synchronization. Rule updates are committed before
//! [`Database::add_rule`] returns, so a subsequent [`Database::load_rules`] always
//! sees them.
//!
//! # Schema
//!
//! Dates are stored as TEXT in `YYYY-MM-DD` form so lexicographic ordering
//! matches chronological ordering. Labels are stored as their display string;
//! any label outside the known set round-trips as a custom category.

use std::path::Path;

use chrono::NaiveDate;
use dl_core::{Category, TaskLabelMap};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Format used for the `date` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A rule was given an empty task or label after trimming.
    #[error("rule {field} cannot be empty")]
    EmptyRuleField { field: &'static str },
    /// A stored date could not be parsed.
    #[error("invalid stored date {value:?}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A stored task rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub task: String,
    pub label: Category,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Raw log text, one row per calendar date (YYYY-MM-DD)
            CREATE TABLE IF NOT EXISTS logs (
                date TEXT PRIMARY KEY,
                text TEXT NOT NULL
            );

            -- Task rules: trimmed task string -> category label
            CREATE TABLE IF NOT EXISTS rules (
                task TEXT PRIMARY KEY,
                label TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_rules_label ON rules(label);
            ",
        )?;
        Ok(())
    }

    /// Stores the log text for a date, replacing any previous text.
    pub fn put_log(&mut self, date: NaiveDate, text: &str) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO logs (date, text) VALUES (?1, ?2)
            ON CONFLICT(date) DO UPDATE SET text = excluded.text
            ",
            params![format_date(date), text],
        )?;
        tracing::debug!(%date, bytes = text.len(), "stored log");
        Ok(())
    }

    /// Returns the log text for a date, if one was stored.
    pub fn get_log(&self, date: NaiveDate) -> Result<Option<String>, DbError> {
        let text = self
            .conn
            .query_row(
                "SELECT text FROM logs WHERE date = ?1",
                params![format_date(date)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(text)
    }

    /// Lists dates that have a stored log, oldest first.
    pub fn list_log_dates(&self) -> Result<Vec<NaiveDate>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT date FROM logs ORDER BY date ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut dates = Vec::new();
        for row in rows {
            let value = row?;
            let date = NaiveDate::parse_from_str(&value, DATE_FORMAT)
                .map_err(|source| DbError::DateParse { value, source })?;
            dates.push(date);
        }
        Ok(dates)
    }

    /// Inserts or updates a rule.
    ///
    /// Both values are trimmed; an empty task or label is rejected. Returns
    /// the previous label if the task already had one.
    pub fn add_rule(&mut self, task: &str, label: &str) -> Result<Option<Category>, DbError> {
        let task = task.trim();
        let label = label.trim();
        if task.is_empty() {
            return Err(DbError::EmptyRuleField { field: "task" });
        }
        if label.is_empty() {
            return Err(DbError::EmptyRuleField { field: "label" });
        }

        let tx = self.conn.transaction()?;
        let previous: Option<String> = tx
            .query_row(
                "SELECT label FROM rules WHERE task = ?1",
                params![task],
                |row| row.get(0),
            )
            .optional()?;
        tx.execute(
            "
            INSERT INTO rules (task, label) VALUES (?1, ?2)
            ON CONFLICT(task) DO UPDATE SET label = excluded.label
            ",
            params![task, Category::parse(label).as_str()],
        )?;
        tx.commit()?;

        tracing::debug!(task, label, replaced = previous.is_some(), "stored rule");
        Ok(previous.as_deref().map(Category::parse))
    }

    /// Removes a rule. Returns whether a rule existed.
    pub fn remove_rule(&mut self, task: &str) -> Result<bool, DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM rules WHERE task = ?1", params![task.trim()])?;
        Ok(removed > 0)
    }

    /// Lists all rules ordered by task.
    pub fn list_rules(&self) -> Result<Vec<RuleRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT task, label FROM rules ORDER BY task ASC")?;
        let rows = stmt.query_map([], |row| {
            let task: String = row.get(0)?;
            let label: String = row.get(1)?;
            Ok(RuleRecord {
                task,
                label: Category::parse(&label),
            })
        })?;
        let mut rules = Vec::new();
        for row in rows {
            rules.push(row?);
        }
        Ok(rules)
    }

    /// Loads a full snapshot of the rules for one classification pass.
    pub fn load_rules(&self) -> Result<TaskLabelMap, DbError> {
        let mut map = TaskLabelMap::new();
        for rule in self.list_rules()? {
            map.insert(&rule.task, rule.label);
        }
        Ok(map)
    }

    pub fn count_logs(&self) -> Result<usize, DbError> {
        self.count("logs")
    }

    pub fn count_rules(&self) -> Result<usize, DbError> {
        self.count("rules")
    }

    fn count(&self, table: &str) -> Result<usize, DbError> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
