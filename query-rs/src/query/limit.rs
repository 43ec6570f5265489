//! Result-limit extraction
//!
//! Pulls a bounded result-count cap out of numeric phrasing. Candidates
//! outside `1..=100` are discarded rather than clamped; the caller keeps
//! its default.

use regex::Regex;

use crate::error::Result;

use super::types::MAX_LIMIT;

/// Time units that disqualify a "last N ..." capture ("last 5 days" is a
/// date range, not a limit)
const TIME_UNITS: &[&str] = &[
    "day", "days", "week", "weeks", "month", "months", "year", "years",
    "hour", "hours", "minute", "minutes",
];

/// Limit extractor
pub struct LimitExtractor {
    patterns: Vec<Regex>,
}

impl LimitExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: vec![
                Regex::new(r"\b(?:top|first|latest|recent|last)\s+(\d+)(?:\s+([a-z]+))?")?,
                Regex::new(r"\b(\d+)\s+(?:emails?|messages?|results?|items?)\b")?,
                Regex::new(r"\blimit\s+(?:to\s+)?(\d+)\b")?,
                Regex::new(r"\bonly\s+(\d+)\b")?,
            ],
        })
    }

    /// Extract a result cap from the utterance, if any.
    ///
    /// Patterns are tried in order; the first candidate in `1..=100`
    /// wins. An out-of-range or time-qualified candidate does not stop
    /// the scan.
    pub fn extract(&self, text: &str) -> Option<usize> {
        for pattern in &self.patterns {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            if let Some(unit) = caps.get(2) {
                if TIME_UNITS.contains(&unit.as_str()) {
                    continue;
                }
            }
            let candidate = caps.get(1)?.as_str().parse::<usize>().ok()?;
            if (1..=MAX_LIMIT).contains(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
