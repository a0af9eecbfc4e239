//! Greedy interval pairing.
//!
//! Events are grouped per author per calendar day, sorted by timestamp, and
//! scanned with a two-pointer cursor: a ClockIn immediately followed by a
//! ClockOut forms an interval and the cursor advances past both; any other
//! adjacency advances the cursor by one, so `[In, In, Out]` pairs the second
//! In with the Out. This is a nearest-neighbor policy, not a global matching
//! optimum. Unmatched events contribute nothing and are dropped without
//! error: a worker who forgot to clock out records zero hours for that
//! stray entry. Pairing never spans midnight.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use timeclock_types::{ActionKind, ClassifiedEvent, WorkInterval};

/// Pair clock events into work intervals, per author per calendar day.
pub fn pair_events(events: &[ClassifiedEvent], decimals: u32) -> Vec<WorkInterval> {
    let mut groups: BTreeMap<(String, NaiveDate), Vec<&ClassifiedEvent>> = BTreeMap::new();
    for event in events {
        if event.action == ActionKind::Other {
            continue;
        }
        groups
            .entry((event.author.clone(), event.timestamp.date()))
            .or_default()
            .push(event);
    }

    let mut intervals = Vec::new();
    for ((author, _date), mut day_events) in groups {
        day_events.sort_by_key(|event| event.timestamp);

        let mut i = 0;
        while i + 1 < day_events.len() {
            let (first, second) = (day_events[i], day_events[i + 1]);
            if first.action == ActionKind::ClockIn && second.action == ActionKind::ClockOut {
                // A consumed pair with equal timestamps emits nothing.
                if let Some(interval) = WorkInterval::new(
                    author.clone(),
                    first.timestamp,
                    second.timestamp,
                    decimals,
                ) {
                    intervals.push(interval);
                }
                i += 2;
            } else {
                i += 1;
            }
        }
    }
    intervals
}
