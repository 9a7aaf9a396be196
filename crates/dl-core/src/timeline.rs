//! Timeline assembly: segmented, timed and classified log entries.

use std::collections::HashSet;

use serde::Serialize;

use crate::category::Category;
use crate::classify::{TaskLabelMap, classify};
use crate::segment::{ParseError, durations, segment};

/// One classified interval of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Line content without the time field.
    pub line: String,
    /// Minutes since midnight at which the interval starts.
    pub start_minutes: i64,
    /// Minutes since midnight of this line's timestamp.
    pub end_minutes: i64,
    /// `end_minutes - start_minutes`; negative if the clock went backwards.
    pub duration_minutes: i64,
    pub label: Category,
    pub tasks: Vec<String>,
    pub task_labels: Vec<Category>,
}

/// Classified entries in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<LogEntry>,
}

/// Column-oriented view of a timeline, one vector per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLogColumns {
    pub durations: Vec<i64>,
    pub lines: Vec<String>,
    pub line_labels: Vec<Category>,
    pub tasks: Vec<Vec<String>>,
    pub task_labels: Vec<Vec<Category>>,
}

/// Parses raw log text into a classified timeline.
pub fn parse_log(log_text: &str, task_to_label: &TaskLabelMap) -> Result<Timeline, ParseError> {
    let segments = segment(log_text)?;
    let durations = durations(&segments);

    let entries: Vec<LogEntry> = segments
        .into_iter()
        .zip(durations)
        .map(|(segment, duration_minutes)| {
            if duration_minutes < 0 {
                tracing::warn!(
                    line = segment.line_number,
                    duration_minutes,
                    "timestamp is earlier than the previous line"
                );
            }
            let classification = classify(&segment.content, task_to_label);
            LogEntry {
                start_minutes: segment.timestamp_minutes - duration_minutes,
                end_minutes: segment.timestamp_minutes,
                duration_minutes,
                label: classification.label,
                tasks: classification.tasks,
                task_labels: classification.task_labels,
                line: segment.content,
            }
        })
        .collect();

    tracing::debug!(
        entries = entries.len(),
        rules = task_to_label.len(),
        "parsed log"
    );
    Ok(Timeline { entries })
}

impl Timeline {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all durations. Equals [`Self::last_timestamp`] for any log.
    pub fn total_minutes(&self) -> i64 {
        self.entries.iter().map(|e| e.duration_minutes).sum()
    }

    /// Timestamp of the last line, or 0 (midnight) for an empty timeline.
    pub fn last_timestamp(&self) -> i64 {
        self.entries.last().map_or(0, |e| e.end_minutes)
    }

    /// Entries whose duration is negative.
    pub fn negative_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.duration_minutes < 0)
    }

    /// Re-runs classification with a new mapping.
    ///
    /// Times are kept; every label is recomputed from scratch.
    #[must_use]
    pub fn reclassify(&self, task_to_label: &TaskLabelMap) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                let classification = classify(&entry.line, task_to_label);
                LogEntry {
                    line: entry.line.clone(),
                    start_minutes: entry.start_minutes,
                    end_minutes: entry.end_minutes,
                    duration_minutes: entry.duration_minutes,
                    label: classification.label,
                    tasks: classification.tasks,
                    task_labels: classification.task_labels,
                }
            })
            .collect();
        tracing::debug!(rules = task_to_label.len(), "reclassified timeline");
        Self { entries }
    }

    /// Distinct sub-tasks labeled `Unknown`, in first-occurrence order.
    pub fn unknown_tasks(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .flat_map(|entry| entry.tasks.iter().zip(&entry.task_labels))
            .filter(|(_, label)| label.is_unknown())
            .map(|(task, _)| task.as_str())
            .filter(|task| seen.insert(*task))
            .collect()
    }

    pub fn to_columns(&self) -> ParsedLogColumns {
        ParsedLogColumns {
            durations: self.entries.iter().map(|e| e.duration_minutes).collect(),
            lines: self.entries.iter().map(|e| e.line.clone()).collect(),
            line_labels: self.entries.iter().map(|e| e.label.clone()).collect(),
            tasks: self.entries.iter().map(|e| e.tasks.clone()).collect(),
            task_labels: self.entries.iter().map(|e| e.task_labels.clone()).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
