//! Transcript file decoding.
//!
//! Chat exports arrive as UTF-8 on most platforms, but Windows-originated
//! exports are sometimes UTF-16. Decoding tries strict UTF-8 first and
//! retries as UTF-16 (BOM-directed) before giving up on the whole file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use timeclock_types::TimeclockError;

/// Decode raw transcript bytes into text.
pub fn decode_bytes(bytes: &[u8]) -> Result<String, TimeclockError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.trim_start_matches('\u{feff}').to_string()),
        Err(_) => decode_utf16(bytes),
    }
}

/// Read a transcript file and decode it.
pub fn read_transcript(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("open transcript at {}", path.display()))?;
    Ok(decode_bytes(&bytes)?)
}

fn decode_utf16(bytes: &[u8]) -> Result<String, TimeclockError> {
    // Little-endian is the common no-BOM case (Windows exports).
    let (payload, big_endian) = match bytes {
        [0xfe, 0xff, rest @ ..] => (rest, true),
        [0xff, 0xfe, rest @ ..] => (rest, false),
        _ => (bytes, false),
    };

    if payload.len() % 2 != 0 {
        return Err(TimeclockError::UnreadableInput {
            reason: "odd byte count for UTF-16".to_string(),
        });
    }

    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|_| TimeclockError::UnreadableInput {
        reason: "invalid UTF-16 code units".to_string(),
    })
}
