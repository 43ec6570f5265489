//! Query types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default folder when no mailbox vocabulary matches
pub const DEFAULT_FOLDER: &str = "INBOX";

/// Default result cap when the utterance names none
pub const DEFAULT_LIMIT: usize = 20;

/// Largest result cap an utterance may request
pub const MAX_LIMIT: usize = 100;

/// Structured search query extracted from a free-form utterance.
///
/// Immutable once constructed; handed to the search executor and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Plain substring term, or the composite `subject:"…" AND body:"…"`
    /// form when field-scoped extraction succeeded
    pub keyword: Option<String>,
    /// True iff `keyword` is the composite field-scoped form
    pub is_complex_query: bool,
    /// Inclusive range start
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive range end
    pub end_date: Option<DateTime<Utc>>,
    /// Free-text sender fragment (address, display name, or domain)
    pub sender: Option<String>,
    /// Canonical folder identifier
    pub folder: String,
    /// Result cap, always in `1..=100`
    pub limit: usize,
    /// Human-readable summary of the effective filters
    pub search_description: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            is_complex_query: false,
            start_date: None,
            end_date: None,
            sender: None,
            folder: DEFAULT_FOLDER.to_string(),
            limit: DEFAULT_LIMIT,
            search_description: format!("Searching {}", DEFAULT_FOLDER),
        }
    }
}

/// Resolved date window. Either side may be open when only a directional
/// bound was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Both bounds known
    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Open-ended towards the future
    pub fn starting(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Open-ended towards the past
    pub fn ending(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }
}

/// Kind of a recognized date mention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateRefKind {
    /// A specific day (absolute date, or month name with a day)
    Specific,
    /// A month name without a day
    Month,
    /// A relative anchor ("yesterday", "2 weeks ago", ...)
    Relative,
}

/// One recognized date mention, before range disambiguation.
///
/// Transient: produced by the scanning passes, consumed inside the
/// temporal resolver, never exposed.
#[derive(Debug, Clone)]
pub(crate) struct DateReference {
    /// Anchor instant (start of the referenced day or month)
    pub instant: DateTime<Utc>,
    /// The text span that produced this reference
    pub matched: String,
    /// Byte offset of the span in the scanned text
    pub offset: usize,
    pub kind: DateRefKind,
    /// Month name with no day given
    pub is_month_only: bool,
}
