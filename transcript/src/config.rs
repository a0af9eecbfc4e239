use crate::classify::{KeywordMatcher, DEFAULT_ENTRY_KEYWORDS, DEFAULT_EXIT_KEYWORDS};
use anyhow::Result;
use std::env;

// ── Defaults ────────────────────────────────────────────────────────────

/// Weekly totals keep this many most-recent weeks (0 keeps every week).
const DEFAULT_RECENT_WEEKS: usize = 1;

/// Decimal places for interval and total hours.
const DEFAULT_ROUNDING_DECIMALS: u32 = 2;

// ── Config struct ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TimeclockConfig {
    pub recent_weeks: usize,
    pub entry_keywords: Vec<String>,
    pub exit_keywords: Vec<String>,
    pub rounding_decimals: u32,
}

impl Default for TimeclockConfig {
    fn default() -> Self {
        Self {
            recent_weeks: DEFAULT_RECENT_WEEKS,
            entry_keywords: to_owned(DEFAULT_ENTRY_KEYWORDS),
            exit_keywords: to_owned(DEFAULT_EXIT_KEYWORDS),
            rounding_decimals: DEFAULT_ROUNDING_DECIMALS,
        }
    }
}

impl TimeclockConfig {
    /// Build the configuration from `TIMECLOCK_*` environment variables,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            recent_weeks: env_usize("TIMECLOCK_RECENT_WEEKS", DEFAULT_RECENT_WEEKS),
            entry_keywords: env_list("TIMECLOCK_ENTRY_KEYWORDS", DEFAULT_ENTRY_KEYWORDS),
            exit_keywords: env_list("TIMECLOCK_EXIT_KEYWORDS", DEFAULT_EXIT_KEYWORDS),
            rounding_decimals: env_u32(
                "TIMECLOCK_ROUNDING_DECIMALS",
                DEFAULT_ROUNDING_DECIMALS,
            ),
        }
    }

    /// Compile the configured keyword sets.
    pub fn matcher(&self) -> Result<KeywordMatcher> {
        KeywordMatcher::new(&self.entry_keywords, &self.exit_keywords)
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(val) => val.parse::<usize>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    match env::var(key) {
        Ok(val) => val.parse::<u32>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => parse_list(&val),
        _ => to_owned(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
