//! Shared timesheet schema: parsed messages, classified clock events, paired
//! work intervals, weekly totals, and the error taxonomy used across the
//! timeclock crates.
//!
//! Every stage of the pipeline derives its output by value from the previous
//! stage's records; nothing here holds back-references or interior mutability.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic tag for one chat message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ClockIn,
    ClockOut,
    /// Ordinary chatter; carried through classification, dropped by pairing.
    Other,
}

/// One transcript line in structured form. Ordering is transcript order,
/// which is not guaranteed to be monotonic in `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub timestamp: NaiveDateTime,
    pub author: String,
    pub body: String,
}

/// A message reduced to its clock action. The body is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEvent {
    pub timestamp: NaiveDateTime,
    pub author: String,
    pub action: ActionKind,
}

/// One paired shift for one author on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkInterval {
    pub author: String,
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hours: f64,
}

impl WorkInterval {
    /// Build an interval from a paired clock-in/clock-out.
    ///
    /// Returns `None` unless `end > start`; zero-length and negative spans
    /// are never emitted. `date` is the calendar date of `start`, and
    /// `hours` is the wall-clock span rounded to `decimals` places.
    pub fn new(
        author: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
        decimals: u32,
    ) -> Option<Self> {
        if end <= start {
            return None;
        }
        let seconds = (end - start).num_seconds();
        let hours = round_hours(seconds as f64 / 3600.0, decimals);
        Some(Self {
            author,
            date: start.date(),
            start,
            end,
            hours,
        })
    }
}

/// Sum of interval hours for one author in one Monday-anchored week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTotal {
    pub author: String,
    /// Always a Monday.
    pub week_start: NaiveDate,
    /// `week_start + 6 days`, the Sunday closing the week.
    pub week_end: NaiveDate,
    pub total_hours: f64,
}

impl WeeklyTotal {
    pub fn new(author: String, week_start: NaiveDate, total_hours: f64) -> Self {
        Self {
            author,
            week_start,
            week_end: week_start + Duration::days(6),
            total_hours,
        }
    }
}

/// The core's complete output: shift intervals plus weekly totals.
///
/// An empty report is the "no valid intervals" condition from the error
/// design: messages parsed but nothing paired. It is reportable, not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimesheetReport {
    pub intervals: Vec<WorkInterval>,
    pub totals: Vec<WeeklyTotal>,
}

impl TimesheetReport {
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty() && self.totals.is_empty()
    }
}

/// Fatal pipeline conditions. Per-line parse failures are recovered silently
/// and never reach this enum.
#[derive(Debug, Error)]
pub enum TimeclockError {
    /// The input decodes under neither UTF-8 nor UTF-16.
    #[error("unreadable input: {reason}")]
    UnreadableInput { reason: String },

    /// The input decoded but zero lines matched a supported chat export
    /// format.
    #[error("no messages parsed: input does not look like a supported chat export")]
    NoMessagesParsed,
}

/// Round to `decimals` places, half away from zero (`f64::round` semantics).
pub fn round_hours(hours: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (hours * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn interval_spans_full_workday() {
        let interval =
            WorkInterval::new("Alice".to_string(), dt(2025, 1, 6, 9, 0), dt(2025, 1, 6, 17, 0), 2)
                .unwrap();
        assert_eq!(interval.date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(interval.hours, 8.00);
    }

    #[test]
    fn interval_rejects_zero_and_negative_spans() {
        let at = dt(2025, 1, 6, 9, 0);
        assert!(WorkInterval::new("Alice".to_string(), at, at, 2).is_none());
        assert!(WorkInterval::new("Alice".to_string(), at, dt(2025, 1, 6, 8, 0), 2).is_none());
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 7.5 minutes is exactly 0.125 h; the tie rounds up, not to even.
        assert_eq!(round_hours(0.125, 2), 0.13);
        assert_eq!(round_hours(7.333333, 2), 7.33);
        assert_eq!(round_hours(8.0, 2), 8.0);
    }

    #[test]
    fn interval_duration_uses_configured_precision() {
        let interval = WorkInterval::new(
            "Bo".to_string(),
            dt(2025, 1, 6, 9, 0),
            // 7.5 minutes
            NaiveDate::from_ymd_opt(2025, 1, 6)
                .unwrap()
                .and_hms_opt(9, 7, 30)
                .unwrap(),
            2,
        )
        .unwrap();
        assert_eq!(interval.hours, 0.13);
    }

    #[test]
    fn weekly_total_closes_on_sunday() {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let total = WeeklyTotal::new("Alice".to_string(), monday, 6.0);
        assert_eq!(total.week_end, NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
    }

    #[test]
    fn empty_report_is_reportable() {
        let report = TimesheetReport::default();
        assert!(report.is_empty());
    }
}
