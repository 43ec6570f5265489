//! Query assembly
//!
//! Runs the extractors in a fixed order (folder, temporal, entity,
//! limit) over the normalized utterance and merges their results into
//! one immutable [`SearchQuery`]. Failure of any sub-extractor degrades
//! to "no constraint", never to an error.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;

use super::entity::EntityExtractor;
use super::folder::FolderClassifier;
use super::limit::LimitExtractor;
use super::temporal::TemporalResolver;
use super::types::{SearchQuery, DEFAULT_FOLDER, DEFAULT_LIMIT};

/// Natural-language search query parser.
///
/// Compiles every pattern table once; `parse` itself is pure and total,
/// safe to call concurrently from any number of callers.
pub struct QueryParser {
    folders: FolderClassifier,
    temporal: TemporalResolver,
    entities: EntityExtractor,
    limits: LimitExtractor,
}

impl QueryParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            folders: FolderClassifier::new()?,
            temporal: TemporalResolver::new()?,
            entities: EntityExtractor::new()?,
            limits: LimitExtractor::new()?,
        })
    }

    /// Parse a free-form search utterance into a structured query.
    ///
    /// `now` anchors every relative date expression; passing it
    /// explicitly keeps the engine deterministic. Empty or blank input
    /// yields the default query.
    pub fn parse(&self, text: &str, now: DateTime<Utc>) -> SearchQuery {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SearchQuery::default();
        }
        let normalized = trimmed.to_lowercase();

        let folder = self.folders.classify(&normalized);
        let range = self.temporal.resolve(&normalized, now);
        let entities = self.entities.extract(&normalized);
        let limit = self.limits.extract(&normalized).unwrap_or(DEFAULT_LIMIT);

        // last resort: if nothing at all was recognized, salvage a
        // keyword from the stripped utterance
        let keyword = if entities.keyword.is_none()
            && entities.sender.is_none()
            && range.is_none()
            && folder == DEFAULT_FOLDER
        {
            self.entities.cleaned_fallback(&normalized)
        } else {
            entities.keyword
        };

        let (start_date, end_date) = match range {
            Some(r) => (r.start, r.end),
            None => (None, None),
        };

        let query = SearchQuery {
            search_description: describe(
                &folder,
                keyword.as_deref(),
                entities.is_complex_query,
                entities.sender.as_deref(),
                start_date,
                end_date,
                limit,
            ),
            keyword,
            is_complex_query: entities.is_complex_query,
            start_date,
            end_date,
            sender: entities.sender,
            folder,
            limit,
        };
        debug!(?query.folder, ?query.sender, ?query.keyword, "parsed search query");
        query
    }
}

/// Human-readable summary of the effective filters. Used for user
/// feedback, not for matching.
fn describe(
    folder: &str,
    keyword: Option<&str>,
    is_complex: bool,
    sender: Option<&str>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    limit: usize,
) -> String {
    let mut description = format!("Searching {folder}");

    if let Some(keyword) = keyword {
        if is_complex {
            description.push_str(&format!(" for {keyword}"));
        } else {
            description.push_str(&format!(" for \"{keyword}\""));
        }
    }
    if let Some(sender) = sender {
        description.push_str(&format!(" from \"{sender}\""));
    }
    match (start_date, end_date) {
        (Some(start), Some(end)) => {
            description.push_str(&format!(
                " between {} and {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ));
        }
        (Some(start), None) => {
            description.push_str(&format!(" after {}", start.format("%Y-%m-%d")));
        }
        (None, Some(end)) => {
            description.push_str(&format!(" before {}", end.format("%Y-%m-%d")));
        }
        (None, None) => {}
    }
    description.push_str(&format!(" (up to {limit} results)"));
    description
}
