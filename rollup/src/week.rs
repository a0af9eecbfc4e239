//! Monday-anchored weekly aggregation.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use timeclock_types::{round_hours, WeeklyTotal, WorkInterval};

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Sum interval hours per `(author, week)`, keeping only the most recent
/// `recent_weeks` distinct weeks present in the data (0 keeps every week).
///
/// Totals come out in `(week_start, author)` order. Summation is a plain
/// commutative reduction, so input order never changes the result; sums are
/// re-rounded to `decimals` places to keep float artifacts out of the
/// report.
pub fn weekly_totals(
    intervals: &[WorkInterval],
    recent_weeks: usize,
    decimals: u32,
) -> Vec<WeeklyTotal> {
    let mut sums: BTreeMap<(NaiveDate, String), f64> = BTreeMap::new();
    for interval in intervals {
        let start = week_start(interval.date);
        *sums.entry((start, interval.author.clone())).or_insert(0.0) += interval.hours;
    }

    let week_starts: BTreeSet<NaiveDate> = sums.keys().map(|(start, _)| *start).collect();
    let keep: BTreeSet<NaiveDate> = if recent_weeks == 0 {
        week_starts
    } else {
        week_starts.into_iter().rev().take(recent_weeks).collect()
    };

    sums.into_iter()
        .filter(|((start, _), _)| keep.contains(start))
        .map(|((start, author), total)| {
            WeeklyTotal::new(author, start, round_hours(total, decimals))
        })
        .collect()
}
