//! Splitting raw log text into timestamped lines.
//!
//! A daily log looks like:
//!
//! ```text
//! 2026-01-28 (header, ignored)
//! 0630 Wake / Stretch
//! 0645 Shower
//! ~
//! 0100 Nap
//! ```
//!
//! Each trimmed line starts with a five-character time field (`H[H]MM`,
//! padded with spaces). A line holding only `~` switches every following
//! time to PM.

use thiserror::Error;

/// The line that switches the rest of the log to PM.
pub const PM_SENTINEL: &str = "~";

/// Width of the leading time field, in characters.
const TIME_FIELD_WIDTH: usize = 5;

/// Errors raised while segmenting a log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The leading field of a line is not an `H[H]MM` time of day.
    #[error("line {line}: malformed time field {field:?}, expected H[H]MM")]
    MalformedTime { line: usize, field: String },
}

/// One timestamped line of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based physical line number, header included.
    pub line_number: usize,
    /// Minutes since midnight, PM offset applied.
    pub timestamp_minutes: i64,
    /// Whether the PM sentinel had been seen before this line.
    pub pm: bool,
    /// Line content after the time field, trimmed.
    pub content: String,
}

/// Splits log text into timestamped lines.
///
/// The header line is dropped, blank lines are skipped and `~` flips the PM
/// flag. Any line whose time field does not parse rejects the whole log.
pub fn segment(log_text: &str) -> Result<Vec<Segment>, ParseError> {
    let mut pm = false;
    let mut segments = Vec::new();

    for (index, raw) in log_text.lines().enumerate().skip(1) {
        let line = raw.trim();
        if line == PM_SENTINEL {
            pm = true;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let split_at = line
            .char_indices()
            .nth(TIME_FIELD_WIDTH)
            .map_or(line.len(), |(i, _)| i);
        let (field, rest) = line.split_at(split_at);
        let field = field.trim();
        let line_number = index + 1;

        let (hour, minute) = parse_time_field(field).ok_or_else(|| ParseError::MalformedTime {
            line: line_number,
            field: field.to_string(),
        })?;
        let hour = if pm { hour + 12 } else { hour };

        segments.push(Segment {
            line_number,
            timestamp_minutes: hour * 60 + minute,
            pm,
            content: rest.trim().to_string(),
        });
    }

    Ok(segments)
}

/// Parses `H[H]MM` into `(hour, minute)`.
fn parse_time_field(field: &str) -> Option<(i64, i64)> {
    if !(3..=4).contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hour, minute) = field.split_at(field.len() - 2);
    let hour: i64 = hour.parse().ok()?;
    let minute: i64 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Elapsed minutes since the previous line, starting from midnight.
///
/// A timestamp earlier than its predecessor yields a negative duration.
pub fn durations(segments: &[Segment]) -> Vec<i64> {
    segments
        .iter()
        .scan(0_i64, |previous, segment| {
            let duration = segment.timestamp_minutes - *previous;
            *previous = segment.timestamp_minutes;
            Some(duration)
        })
        .collect()
}
