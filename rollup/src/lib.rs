//! Reduction layer: pairs classified clock events into work intervals and
//! rolls them up into Monday-anchored weekly totals.

pub mod pair;
pub mod week;

use timeclock_types::{ClassifiedEvent, TimesheetReport};
use transcript::config::TimeclockConfig;

/// Run pairing and weekly aggregation over classified events.
///
/// Intervals come out ordered by `(author, start)`; totals by
/// `(week_start, author)`. Same events in, same report out, regardless of
/// input order.
pub fn build_report(events: &[ClassifiedEvent], config: &TimeclockConfig) -> TimesheetReport {
    let intervals = pair::pair_events(events, config.rounding_decimals);
    let totals = week::weekly_totals(&intervals, config.recent_weeks, config.rounding_decimals);
    TimesheetReport { intervals, totals }
}
