//! Transcript line parsing.
//!
//! Two export line shapes are recognized:
//!
//! ```text
//! [1/6/25, 9:00:00 AM] Alice: in
//! 1/6/25, 9:00 AM - Alice: in
//! ```
//!
//! Seconds are optional in both, years may be two or four digits, and the
//! space before the AM/PM marker may be a non-breaking-space variant. Lines
//! that match neither shape, or that match but carry an impossible date or
//! time, are dropped; output preserves transcript order.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use timeclock_types::{Message, TimeclockError};

/// `[M/D/YY, H:MM:SS AM/PM] Author: Body` (bracketed export).
static BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[(\d{1,2})/(\d{1,2})/(\d{2,4}), (\d{1,2}):(\d{2})(?::(\d{2}))? ([AaPp][Mm])\] ([^:]+): (.*)$",
    )
    .unwrap()
});

/// `M/D/YY, H:MM AM/PM - Author: Body` (dashed export).
static DASHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{2,4}), (\d{1,2}):(\d{2})(?::(\d{2}))? ([AaPp][Mm]) - ([^:]+): (.*)$",
    )
    .unwrap()
});

/// Line counters for one parse pass, printed by the CLI on completion.
#[derive(Debug, Default, Clone)]
pub struct ParseStats {
    pub parsed: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct ParsedTranscript {
    pub messages: Vec<Message>,
    pub stats: ParseStats,
}

/// Parse a whole transcript into messages, in transcript order.
///
/// Unrecognized lines are skipped silently (debug-logged); zero recognized
/// lines across the whole input is the distinct `NoMessagesParsed` condition.
pub fn parse_transcript(text: &str) -> Result<ParsedTranscript, TimeclockError> {
    let mut messages = Vec::new();
    let mut stats = ParseStats::default();

    for (index, raw) in text.lines().enumerate() {
        match parse_line(raw) {
            Some(message) => {
                stats.parsed += 1;
                messages.push(message);
            }
            None => {
                stats.skipped += 1;
                if !raw.trim().is_empty() {
                    tracing::debug!(line = index + 1, "skipped unrecognized transcript line");
                }
            }
        }
    }

    if messages.is_empty() {
        return Err(TimeclockError::NoMessagesParsed);
    }
    Ok(ParsedTranscript { messages, stats })
}

/// Parse one transcript line, or `None` if it matches neither export shape
/// or its timestamp components are out of range.
pub fn parse_line(raw: &str) -> Option<Message> {
    let line = normalize_spaces(raw);
    let caps = BRACKETED
        .captures(&line)
        .or_else(|| DASHED.captures(&line))?;
    let timestamp = build_timestamp(&caps)?;

    Some(Message {
        timestamp,
        author: caps[8].trim().to_string(),
        body: caps[9].trim().to_string(),
    })
}

/// Exports use U+00A0 or U+202F before the AM/PM marker depending on the
/// platform; both must parse identically to an ordinary space.
fn normalize_spaces(line: &str) -> String {
    line.replace(['\u{00a0}', '\u{202f}'], " ")
}

fn build_timestamp(caps: &Captures) -> Option<NaiveDateTime> {
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let year = if caps[3].len() == 2 { 2000 + year } else { year };

    let hour12: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;
    let second: u32 = match caps.get(6) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let hour = match (caps[7].to_ascii_uppercase().as_str(), hour12) {
        ("AM", 12) => 0,
        ("AM", h @ 1..=11) => h,
        ("PM", 12) => 12,
        ("PM", h @ 1..=11) => h + 12,
        _ => return None,
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_bracketed_line() {
        let msg = parse_line("[1/6/25, 9:00:00 AM] Alice: in").unwrap();
        assert_eq!(msg.timestamp, ts(2025, 1, 6, 9, 0, 0));
        assert_eq!(msg.author, "Alice");
        assert_eq!(msg.body, "in");
    }

    #[test]
    fn parses_dashed_line() {
        let msg = parse_line("1/6/25, 5:30 PM - Bob Smith: heading out").unwrap();
        assert_eq!(msg.timestamp, ts(2025, 1, 6, 17, 30, 0));
        assert_eq!(msg.author, "Bob Smith");
        assert_eq!(msg.body, "heading out");
    }

    #[test]
    fn seconds_are_optional_in_bracketed_lines() {
        let msg = parse_line("[1/6/25, 9:00 AM] Alice: in").unwrap();
        assert_eq!(msg.timestamp, ts(2025, 1, 6, 9, 0, 0));
    }

    #[test]
    fn parses_four_digit_years() {
        let msg = parse_line("[12/31/2024, 11:59:59 PM] Alice: out").unwrap();
        assert_eq!(msg.timestamp, ts(2024, 12, 31, 23, 59, 59));
    }

    #[test]
    fn narrow_no_break_space_before_meridiem_parses() {
        let msg = parse_line("[1/6/25, 9:00:00\u{202f}AM] Alice: in").unwrap();
        assert_eq!(msg.timestamp, ts(2025, 1, 6, 9, 0, 0));

        let msg = parse_line("1/6/25, 9:00\u{00a0}AM - Alice: in").unwrap();
        assert_eq!(msg.timestamp, ts(2025, 1, 6, 9, 0, 0));
    }

    #[test]
    fn noon_and_midnight_convert_correctly() {
        let noon = parse_line("[1/6/25, 12:00:00 PM] Alice: lunch").unwrap();
        assert_eq!(noon.timestamp, ts(2025, 1, 6, 12, 0, 0));

        let midnight = parse_line("[1/6/25, 12:00:00 AM] Alice: in").unwrap();
        assert_eq!(midnight.timestamp, ts(2025, 1, 6, 0, 0, 0));
    }

    #[test]
    fn impossible_dates_are_dropped_not_fatal() {
        assert!(parse_line("[13/45/25, 9:00:00 AM] Alice: in").is_none());
        assert!(parse_line("[2/30/25, 9:00:00 AM] Alice: in").is_none());
        assert!(parse_line("[1/6/25, 13:00:00 PM] Alice: in").is_none());
    }

    #[test]
    fn chatter_lines_do_not_match() {
        assert!(parse_line("Messages and calls are end-to-end encrypted.").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn transcript_order_is_preserved_without_sorting() {
        let text = "[1/6/25, 5:00:00 PM] Alice: out\n\
                    not a message line\n\
                    [1/6/25, 9:00:00 AM] Alice: in\n";
        let parsed = parse_transcript(text).unwrap();
        assert_eq!(parsed.stats.parsed, 2);
        assert_eq!(parsed.stats.skipped, 1);
        // The later-timestamped line stays first: transcript order wins here.
        assert_eq!(parsed.messages[0].timestamp, ts(2025, 1, 6, 17, 0, 0));
        assert_eq!(parsed.messages[1].timestamp, ts(2025, 1, 6, 9, 0, 0));
    }

    #[test]
    fn zero_matches_is_the_no_messages_condition() {
        let err = parse_transcript("hello\nworld\n").unwrap_err();
        assert!(matches!(err, TimeclockError::NoMessagesParsed));
    }
}
