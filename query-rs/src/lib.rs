//! query-rs: Natural-language mailbox search query extraction
//!
//! Converts a free-form English search utterance into a structured,
//! immutable [`SearchQuery`] usable by a mailbox search executor.
//!
//! # Features
//!
//! - **Deterministic**: pure pattern-and-heuristic matching, no trained
//!   model; identical input and clock always produce identical output
//! - **Temporal resolution**: named ranges ("last week"), parametric
//!   windows ("past 3 months"), compound spans ("between january 1 and
//!   january 31"), absolute dates and bare weekday names
//! - **Entity extraction**: senders, subject-/body-scoped keywords with
//!   composite AND assembly, general topics, and a cleaned-text fallback
//! - **Total**: malformed fragments degrade to "no constraint", never
//!   to an error
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use query_rs::QueryParser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = QueryParser::new()?;
//! let query = parser.parse("find emails from alice about budget reports", Utc::now());
//!
//! assert_eq!(query.sender.as_deref(), Some("alice"));
//! assert_eq!(query.keyword.as_deref(), Some("budget reports"));
//! assert_eq!(query.folder, "INBOX");
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`query`]: the extraction engine (folder, temporal, entity, limit,
//!   assembler)
//! - [`executor`]: the downstream search-executor boundary
//! - [`error`]: error types and handling

pub mod error;
pub mod executor;
pub mod query;

// Re-export commonly used types
pub use error::{QueryError, Result};
pub use executor::{EmailRecord, MemoryExecutor, SearchExecutor, SearchResult, SearchResults};
pub use query::{DateRange, QueryParser, SearchQuery};

use chrono::{DateTime, Utc};

/// One-shot convenience wrapper around [`QueryParser`].
///
/// Fails only if the engine's fixed pattern tables do not compile,
/// which a single test run rules out; reuse a [`QueryParser`] when
/// parsing repeatedly.
pub fn parse_query(text: &str, now: DateTime<Utc>) -> Result<SearchQuery> {
    Ok(QueryParser::new()?.parse(text, now))
}
