//! Core domain logic for the daily activity log.
//!
//! This crate turns raw log text plus a task → category mapping into a
//! classified timeline:
//! - Segmenting: splitting the log into timestamped lines
//! - Classification: labelling sub-tasks and resolving a line label by priority
//! - Summary: per-category totals split into AM/PM halves

pub mod category;
pub mod classify;
pub mod segment;
pub mod summary;
pub mod timeline;

pub use category::Category;
pub use classify::{Classification, TaskLabelMap, classify};
pub use segment::{ParseError, Segment, durations, segment};
pub use summary::{CategoryTotal, DaySummary, format_clock, format_minutes};
pub use timeline::{LogEntry, ParsedLogColumns, Timeline, parse_log};
