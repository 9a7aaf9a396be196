//! Per-category day summary with AM/PM halves.

use std::collections::HashMap;

use serde::Serialize;

use crate::category::Category;
use crate::timeline::Timeline;

/// Minutes from midnight to noon.
pub const NOON_MINUTES: i64 = 12 * 60;

/// Minutes in a day.
pub const DAY_MINUTES: i64 = 24 * 60;

/// Time spent on one line label, split at noon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: Category,
    pub am_minutes: i64,
    pub pm_minutes: i64,
    pub total_minutes: i64,
}

/// Aggregate view of a timeline over a 24-hour day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    /// Ordered by category priority, custom labels alphabetically.
    pub categories: Vec<CategoryTotal>,
    pub tracked_minutes: i64,
    /// Remainder of the 24-hour day, never negative.
    pub untracked_minutes: i64,
    /// Entries with a negative duration; they add nothing to the totals.
    pub negative_entries: usize,
}

impl DaySummary {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let mut halves: HashMap<&Category, (i64, i64)> = HashMap::new();
        let mut negative_entries = 0;

        for entry in timeline {
            if entry.duration_minutes < 0 {
                negative_entries += 1;
                continue;
            }
            let (am, pm) = split_at_noon(entry.start_minutes, entry.end_minutes);
            let totals = halves.entry(&entry.label).or_default();
            totals.0 += am;
            totals.1 += pm;
        }

        let mut categories: Vec<CategoryTotal> = halves
            .into_iter()
            .map(|(label, (am_minutes, pm_minutes))| CategoryTotal {
                label: label.clone(),
                am_minutes,
                pm_minutes,
                total_minutes: am_minutes + pm_minutes,
            })
            .collect();
        categories.sort_by(|a, b| {
            a.label
                .rank()
                .cmp(&b.label.rank())
                .then_with(|| a.label.as_str().cmp(b.label.as_str()))
        });

        let tracked_minutes: i64 = categories.iter().map(|c| c.total_minutes).sum();
        Self {
            categories,
            tracked_minutes,
            untracked_minutes: (DAY_MINUTES - tracked_minutes).max(0),
            negative_entries,
        }
    }

    pub fn get(&self, label: &Category) -> Option<&CategoryTotal> {
        self.categories.iter().find(|c| &c.label == label)
    }
}

/// Splits `[start, end)` into the minutes before and after noon.
fn split_at_noon(start: i64, end: i64) -> (i64, i64) {
    let am = (end.min(NOON_MINUTES) - start.min(NOON_MINUTES)).max(0);
    let pm = (end - start.max(NOON_MINUTES)).max(0);
    (am, pm)
}

/// Formats minutes as "Xh Ym", or "Ym" under an hour.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.unsigned_abs();
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours >= 1 {
        format!("{sign}{hours}h {rest}m")
    } else {
        format!("{sign}{rest}m")
    }
}

/// Formats minutes since midnight as a 24-hour "HH:MM" clock.
pub fn format_clock(minutes: i64) -> String {
    format!(
        "{:02}:{:02}",
        minutes.div_euclid(60),
        minutes.rem_euclid(60)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TaskLabelMap;
    use crate::timeline::parse_log;

    fn rules() -> TaskLabelMap {
        [
            ("Sleep", "Misc"),
            ("Lecture", "School and Work"),
            ("Lunch", "Activities of Daily Living"),
            ("Commute", "Ignore"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn splits_entries_across_noon() {
        assert_eq!(split_at_noon(0, 390), (390, 0));
        assert_eq!(split_at_noon(660, 780), (60, 60));
        assert_eq!(split_at_noon(720, 900), (0, 180));
    }

    #[test]
    fn totals_per_category_with_halves() {
        let log = "HEADER\n0700 Sleep\n1100 Lecture\n~\n0100 Lunch\n0130 Commute\n0500 Lecture";
        let timeline = parse_log(log, &rules()).unwrap();
        let summary = DaySummary::from_timeline(&timeline);

        let lecture = summary.get(&Category::SchoolAndWork).unwrap();
        assert_eq!((lecture.am_minutes, lecture.pm_minutes), (240, 210));
        assert_eq!(lecture.total_minutes, 450);

        let sleep = summary.get(&Category::Misc).unwrap();
        // Sleep until 07:00 plus the ignored commute shown as Misc.
        assert_eq!((sleep.am_minutes, sleep.pm_minutes), (420, 30));

        let lunch = summary
            .get(&Category::Custom("Activities of Daily Living".to_string()))
            .unwrap();
        assert_eq!((lunch.am_minutes, lunch.pm_minutes), (60, 60));

        assert_eq!(summary.tracked_minutes, timeline.total_minutes());
        assert_eq!(summary.untracked_minutes, DAY_MINUTES - 17 * 60);
    }

    #[test]
    fn categories_follow_priority_order() {
        let log = "HEADER\n0700 Sleep\n0800 Lunch\n0900 Lecture\n1000 Email";
        let summary = DaySummary::from_timeline(&parse_log(log, &rules()).unwrap());
        let labels: Vec<&str> = summary.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Unknown",
                "School and Work",
                "Misc",
                "Activities of Daily Living"
            ]
        );
    }

    #[test]
    fn negative_entries_are_counted_not_summed() {
        let log = "HEADER\n1100 Lecture\n0100 Sleep";
        let summary = DaySummary::from_timeline(&parse_log(log, &rules()).unwrap());
        assert_eq!(summary.negative_entries, 1);
        assert_eq!(summary.tracked_minutes, 660);
        assert!(summary.get(&Category::Misc).is_none());
    }

    #[test]
    fn empty_timeline_is_all_untracked() {
        let summary = DaySummary::from_timeline(&Timeline::default());
        assert!(summary.categories.is_empty());
        assert_eq!(summary.untracked_minutes, DAY_MINUTES);
    }

    #[test]
    fn format_minutes_hours_and_minutes() {
        assert_eq!(format_minutes(390), "6h 30m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(0), "0m");
    }

    #[test]
    fn format_minutes_keeps_negative_sign() {
        assert_eq!(format_minutes(-600), "-10h 0m");
        assert_eq!(format_minutes(-5), "-5m");
    }

    #[test]
    fn format_clock_pads_and_allows_midnight_end() {
        assert_eq!(format_clock(390), "06:30");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(1440), "24:00");
    }
}
