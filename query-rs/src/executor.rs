//! Search execution boundary
//!
//! The extraction engine hands its [`SearchQuery`] to a downstream
//! executor and makes no assumption about whether that executor talks
//! to a local store or a remote mailbox. [`MemoryExecutor`] is the
//! in-memory reference implementation of the contract: composite
//! keywords apply subject/body filters with logical AND, the sender is
//! a case-insensitive substring match, date bounds are inclusive, and
//! results are truncated to the limit.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::SearchQuery;

/// One email visible to the executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    pub message_id: String,
    pub folder: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub date: DateTime<Utc>,
}

/// Search result entry
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Email message ID
    pub message_id: String,
    /// Subject line
    pub subject: String,
    /// Sender
    pub from: String,
    /// Date sent
    pub date: DateTime<Utc>,
    /// Folder containing the email
    pub folder: String,
    /// Snippet from the body
    pub snippet: String,
}

/// Search results response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// Matching results, newest first
    pub results: Vec<SearchResult>,
    /// Total matches before truncation
    pub total: usize,
    /// Query time in milliseconds
    pub query_time_ms: u64,
}

/// Downstream consumer of a structured query
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    async fn execute(&self, query: &SearchQuery) -> Result<SearchResults>;
}

/// In-memory search executor
pub struct MemoryExecutor {
    emails: Vec<EmailRecord>,
}

impl MemoryExecutor {
    pub fn new(emails: Vec<EmailRecord>) -> Self {
        Self { emails }
    }

    fn matches(&self, email: &EmailRecord, query: &SearchQuery) -> bool {
        if email.folder != query.folder {
            return false;
        }
        if let Some(sender) = &query.sender {
            if !email.from.to_lowercase().contains(&sender.to_lowercase()) {
                return false;
            }
        }
        if let Some(start) = query.start_date {
            if email.date < start {
                return false;
            }
        }
        if let Some(end) = query.end_date {
            if email.date > end {
                return false;
            }
        }
        if let Some(keyword) = &query.keyword {
            if query.is_complex_query {
                return matches_composite(email, keyword);
            }
            let keyword = keyword.to_lowercase();
            return email.subject.to_lowercase().contains(&keyword)
                || email.body.to_lowercase().contains(&keyword);
        }
        true
    }
}

#[async_trait]
impl SearchExecutor for MemoryExecutor {
    async fn execute(&self, query: &SearchQuery) -> Result<SearchResults> {
        let started = std::time::Instant::now();

        let mut matches: Vec<&EmailRecord> = self
            .emails
            .iter()
            .filter(|email| self.matches(email, query))
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));

        let total = matches.len();
        let results = matches
            .into_iter()
            .take(query.limit)
            .map(|email| SearchResult {
                message_id: email.message_id.clone(),
                subject: email.subject.clone(),
                from: email.from.clone(),
                date: email.date,
                folder: email.folder.clone(),
                snippet: email.body.chars().take(80).collect(),
            })
            .collect();

        Ok(SearchResults {
            results,
            total,
            query_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }
}

/// Apply the composite `subject:"…" AND body:"…"` form: every present
/// field term must match its field.
fn matches_composite(email: &EmailRecord, keyword: &str) -> bool {
    let subject_term = field_term(keyword, "subject:\"");
    let body_term = field_term(keyword, "body:\"");

    if let Some(term) = subject_term {
        if !email.subject.to_lowercase().contains(&term.to_lowercase()) {
            return false;
        }
    }
    if let Some(term) = body_term {
        if !email.body.to_lowercase().contains(&term.to_lowercase()) {
            return false;
        }
    }
    subject_term.is_some() || body_term.is_some()
}

/// Pull one quoted field term out of a composite keyword
fn field_term<'a>(keyword: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = &keyword[keyword.find(prefix)? + prefix.len()..];
    rest.split('"').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn email(
        id: &str,
        folder: &str,
        from: &str,
        subject: &str,
        body: &str,
        date: DateTime<Utc>,
    ) -> EmailRecord {
        EmailRecord {
            message_id: id.to_string(),
            folder: folder.to_string(),
            from: from.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            date,
        }
    }

    fn corpus() -> Vec<EmailRecord> {
        let day = |d| Utc.with_ymd_and_hms(2024, 3, d, 10, 0, 0).unwrap();
        vec![
            email(
                "1",
                "INBOX",
                "Sarah Connor <sarah@example.com>",
                "Quarterly report",
                "The quarterly numbers are attached",
                day(1),
            ),
            email(
                "2",
                "INBOX",
                "bob@example.com",
                "Project kickoff",
                "Budget discussion for the new project",
                day(5),
            ),
            email(
                "3",
                "[Gmail]/Spam",
                "spam@junk.example",
                "You won",
                "Claim your prize",
                day(6),
            ),
        ]
    }

    #[tokio::test]
    async fn test_sender_is_case_insensitive_substring() {
        let executor = MemoryExecutor::new(corpus());
        let query = SearchQuery {
            sender: Some("sarah".to_string()),
            ..SearchQuery::default()
        };
        let results = executor.execute(&query).await.unwrap();
        assert_eq!(results.total, 1);
        assert_eq!(results.results[0].message_id, "1");
    }

    #[tokio::test]
    async fn test_date_bounds_are_inclusive() {
        let executor = MemoryExecutor::new(corpus());
        let query = SearchQuery {
            start_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()),
            ..SearchQuery::default()
        };
        let results = executor.execute(&query).await.unwrap();
        assert_eq!(results.total, 2);
    }

    #[tokio::test]
    async fn test_composite_keyword_requires_both_fields() {
        let executor = MemoryExecutor::new(corpus());
        let query = SearchQuery {
            keyword: Some(r#"subject:"project" AND body:"budget""#.to_string()),
            is_complex_query: true,
            ..SearchQuery::default()
        };
        let results = executor.execute(&query).await.unwrap();
        assert_eq!(results.total, 1);
        assert_eq!(results.results[0].message_id, "2");
    }

    #[tokio::test]
    async fn test_plain_keyword_matches_subject_or_body() {
        let executor = MemoryExecutor::new(corpus());
        let query = SearchQuery {
            keyword: Some("quarterly".to_string()),
            ..SearchQuery::default()
        };
        let results = executor.execute(&query).await.unwrap();
        assert_eq!(results.total, 1);
    }

    #[tokio::test]
    async fn test_folder_filter_and_limit() {
        let executor = MemoryExecutor::new(corpus());
        let query = SearchQuery {
            folder: "[Gmail]/Spam".to_string(),
            ..SearchQuery::default()
        };
        let results = executor.execute(&query).await.unwrap();
        assert_eq!(results.total, 1);

        let query = SearchQuery {
            limit: 1,
            ..SearchQuery::default()
        };
        let results = executor.execute(&query).await.unwrap();
        assert_eq!(results.total, 2);
        assert_eq!(results.results.len(), 1);
        // newest first
        assert_eq!(results.results[0].message_id, "2");
    }
}
