//! Clock action classification.
//!
//! Bodies are matched case-insensitively against an "entry" and an "exit"
//! keyword set on word boundaries, so "login" never satisfies "in" and
//! "without" never satisfies "out". A small exclusion-phrase list handles
//! the genuine boundary matches that still do not mean a shift edge
//! ("not in", "log in late"). Classification is a pure function of the body
//! text; it never looks at the author's history.

use anyhow::{Context, Result};
use regex::Regex;
use timeclock_types::{ActionKind, ClassifiedEvent, Message};

pub const DEFAULT_ENTRY_KEYWORDS: &[&str] = &["in", "back", "return"];
pub const DEFAULT_EXIT_KEYWORDS: &[&str] = &["out", "done", "bye", "lunch"];

/// Phrases that defeat an entry-keyword match.
const ENTRY_EXCLUSIONS: &[&str] = &["login", "join", "joining", "informed", "not in", "log in late"];

/// Phrases that defeat an exit-keyword match.
const EXIT_EXCLUSIONS: &[&str] = &["without"];

/// Compiled keyword sets. Build once per run from the configuration.
#[derive(Debug)]
pub struct KeywordMatcher {
    entry: Regex,
    exit: Regex,
}

impl KeywordMatcher {
    pub fn new(entry_keywords: &[String], exit_keywords: &[String]) -> Result<Self> {
        Ok(Self {
            entry: word_set_regex(entry_keywords)?,
            exit: word_set_regex(exit_keywords)?,
        })
    }

    /// Map one message body to its action. Entry is checked before exit;
    /// a body matching neither set is `Other`.
    pub fn classify(&self, body: &str) -> ActionKind {
        let lowered = body.to_lowercase();
        if self.entry.is_match(&lowered) && !contains_any(&lowered, ENTRY_EXCLUSIONS) {
            return ActionKind::ClockIn;
        }
        if self.exit.is_match(&lowered) && !contains_any(&lowered, EXIT_EXCLUSIONS) {
            return ActionKind::ClockOut;
        }
        ActionKind::Other
    }
}

/// Classify every message, `Other` included. The pairer filters `Other`
/// out, which keeps the one-message-to-one-event derivation visible here.
pub fn classify_messages(messages: &[Message], matcher: &KeywordMatcher) -> Vec<ClassifiedEvent> {
    messages
        .iter()
        .map(|message| ClassifiedEvent {
            timestamp: message.timestamp,
            author: message.author.clone(),
            action: matcher.classify(&message.body),
        })
        .collect()
}

fn word_set_regex(keywords: &[String]) -> Result<Regex> {
    anyhow::ensure!(!keywords.is_empty(), "keyword set must not be empty");
    let escaped: Vec<String> = keywords
        .iter()
        .map(|keyword| regex::escape(keyword.trim()))
        .collect();
    let pattern = format!(r"\b(?:{})\b", escaped.join("|"));
    Regex::new(&pattern).context("compile keyword regex")
}

fn contains_any(body: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| body.contains(phrase))
}
