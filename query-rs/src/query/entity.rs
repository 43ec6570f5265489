//! Entity extraction
//!
//! Pulls sender and keyword/topic information out of an utterance.
//! Keywords come in three flavors: subject-scoped, body-scoped, and
//! general. When a field-scoped term is found the keyword becomes the
//! composite `subject:"…" AND body:"…"` form and the query is flagged
//! complex.

use regex::Regex;
use tracing::trace;

use crate::error::Result;

/// Spurious single-word matches rejected as senders
const SENDER_STOPWORDS: &[&str] = &[
    "and", "the", "with", "for", "in", "on", "at", "by", "to", "a", "an",
];

/// Pronouns that disqualify a bare-name capture so the domain-oriented
/// patterns get their turn ("someone from acme.io")
const SENDER_PRONOUNS: &[&str] = &["someone", "anyone", "people", "folks", "everyone"];

/// Words that terminate a bare sender-name capture
const NAME_CONNECTIVES: &[&str] = &[
    "about", "regarding", "concerning", "containing", "mentioning", "with",
    "that", "which", "who", "in", "on", "at", "to", "for", "received", "sent",
    "dated", "before", "after", "since", "between", "during", "and", "or",
    "last", "this", "today", "yesterday",
];

/// Leading tokens stripped from loose keyword captures
const KEYWORD_FILLER: &[&str] = &[
    "emails", "email", "messages", "message", "mail", "mails", "all", "my",
    "the", "me", "some", "any", "top", "first", "last", "latest", "recent",
];

/// Vocabulary removed by the cleaned-text fallback
const FALLBACK_FILLER: &[&str] = &[
    "search", "find", "show", "get", "give", "display", "list", "look",
    "up", "me", "my", "all", "the", "a", "an", "please", "can", "you",
    "emails", "email", "messages", "message", "mail", "mails", "inbox",
    "folder", "in", "from", "to", "for", "of", "with", "and", "or", "is",
    "are", "that", "which", "received", "sent", "before", "after", "since",
    "about", "recent", "latest", "new",
];

const EMAIL_ADDRESS: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const NAME_WORDS: &str = r"(?:[a-z0-9._%+-]+\s+){0,2}[a-z0-9._%+-]+";
const SCOPE_VERBS: &str = r"(?:containing|contains|has|having|includes|include|including|with|like|is|equals|equal)";

/// How a sender capture is post-processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SenderKind {
    /// Exact address or domain, taken verbatim
    Verbatim,
    /// Free-text name, truncated at the first connective word
    Name,
}

/// Extraction result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMatch {
    pub sender: Option<String>,
    pub keyword: Option<String>,
    pub is_complex_query: bool,
}

/// Entity extractor
pub struct EntityExtractor {
    sender_patterns: Vec<(Regex, SenderKind)>,
    subject_patterns: Vec<Regex>,
    body_patterns: Vec<Regex>,
    general_patterns: Vec<Regex>,
    strip_re: Regex,
}

impl EntityExtractor {
    pub fn new() -> Result<Self> {
        let sender_patterns = vec![
            (
                Regex::new(&format!(
                    r"\b(?:from|by|sent\s+by)\s+({EMAIL_ADDRESS})"
                ))?,
                SenderKind::Verbatim,
            ),
            (
                Regex::new(r#"\b(?:from|by|sent\s+by)\s+"([^"]+)""#)?,
                SenderKind::Name,
            ),
            (
                Regex::new(&format!(r"\b(?:from|by|sent\s+by)\s+({NAME_WORDS})"))?,
                SenderKind::Name,
            ),
            (
                Regex::new(
                    r"\b(?:from|at)\s+([a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.(?:com|org|net|io|co|dev|edu|gov))\b",
                )?,
                SenderKind::Verbatim,
            ),
            (
                Regex::new(&format!(
                    r"\b(?:authored|written|composed)\s+by\s+({NAME_WORDS})"
                ))?,
                SenderKind::Name,
            ),
            (
                Regex::new(
                    r"\b(?:people|someone|anyone|folks)\s+from\s+([a-z0-9][a-z0-9.-]*\.[a-z]{2,})",
                )?,
                SenderKind::Verbatim,
            ),
        ];

        let subject_patterns = Self::scoped_patterns("subject|title|headline")?;
        let body_patterns = Self::scoped_patterns("body|content|text|message")?;

        let general_patterns = vec![
            Regex::new(
                r"\b(?:about|regarding|concerning|related\s+to|mentioning|containing|with)\s+(.+?)(?:\s+(?:received|sent|from|before|after|since|between|in|on|during|last|this)\b.*|[,.].*)?$",
            )?,
            Regex::new(
                r"\b(?:search\s+for|look\s+for|look\s+up|find|show)\s+(.+?)(?:\s+(?:received|sent|from|before|after|since|between|in|on|during)\b.*|[,.].*)?$",
            )?,
            Regex::new(r#""([^"]+)""#)?,
        ];

        Ok(Self {
            sender_patterns,
            subject_patterns,
            body_patterns,
            general_patterns,
            strip_re: Regex::new(r"[^a-z0-9@\s]")?,
        })
    }

    /// Field-scoped pattern pair for one field vocabulary: quoted and
    /// bare terms after a verb of containment, plus the inverse
    /// "X in the subject" form.
    fn scoped_patterns(field: &str) -> Result<Vec<Regex>> {
        Ok(vec![
            Regex::new(&format!(
                r#"\b(?:{field})\s+{SCOPE_VERBS}\s+"([^"]+)""#
            ))?,
            Regex::new(&format!(
                r"\b(?:{field})\s+{SCOPE_VERBS}\s+(.+?)(?:\s+(?:and|or|with)\b.*|[,.].*)?$"
            ))?,
            Regex::new(&format!(
                r#""([^"]+)"\s+in\s+(?:the\s+)?(?:{field})\b"#
            ))?,
            Regex::new(&format!(
                r"\b{SCOPE_VERBS}\s+(.+?)\s+in\s+(?:the\s+)?(?:{field})\b"
            ))?,
        ])
    }

    /// Extract sender and keyword information from an utterance.
    pub fn extract(&self, text: &str) -> EntityMatch {
        let sender = self.extract_sender(text);

        let subject_term = first_capture(&self.subject_patterns, text);
        let body_term = first_capture(&self.body_patterns, text);

        // a field-scoped term takes precedence over any general keyword
        let (keyword, is_complex_query) = match (subject_term, body_term) {
            (None, None) => (self.extract_general(text), false),
            (subject, body) => (Some(composite_keyword(subject, body)), true),
        };

        trace!(?sender, ?keyword, is_complex_query, "entities extracted");
        EntityMatch {
            sender,
            keyword,
            is_complex_query,
        }
    }

    fn extract_sender(&self, text: &str) -> Option<String> {
        for (pattern, kind) in &self.sender_patterns {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let Some(raw) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let candidate = match kind {
                SenderKind::Verbatim => raw.trim().to_string(),
                SenderKind::Name => truncate_name(raw),
            };
            let first_word = candidate.split_whitespace().next().unwrap_or("");
            if candidate.len() > 2
                && !SENDER_STOPWORDS.contains(&candidate.as_str())
                && !SENDER_PRONOUNS.contains(&first_word)
            {
                return Some(candidate);
            }
        }
        None
    }

    /// General keyword: attempted only when no field-scoped term matched
    fn extract_general(&self, text: &str) -> Option<String> {
        for pattern in &self.general_patterns {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let Some(raw) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let cleaned = strip_leading_filler(raw);
            if cleaned.len() > 2 {
                return Some(cleaned);
            }
        }
        None
    }

    /// Last resort: strip filler vocabulary and punctuation from the
    /// whole utterance and keep whatever meaningful content remains.
    ///
    /// Only called by the assembler when no sender, date, keyword, or
    /// folder was recognized.
    pub fn cleaned_fallback(&self, text: &str) -> Option<String> {
        let stripped = self.strip_re.replace_all(text, " ");
        let remainder: Vec<&str> = stripped
            .split_whitespace()
            .filter(|word| !FALLBACK_FILLER.contains(word))
            .collect();
        let remainder = remainder.join(" ");
        if remainder.len() > 2 {
            Some(remainder)
        } else {
            None
        }
    }
}

/// First capture of the first matching pattern in an ordered list
fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let term = m.as_str().trim().trim_matches('"').trim();
                if !term.is_empty() {
                    return Some(term.to_string());
                }
            }
        }
    }
    None
}

/// Assemble the composite field-scoped keyword, omitting absent sides
fn composite_keyword(subject: Option<String>, body: Option<String>) -> String {
    match (subject, body) {
        (Some(s), Some(b)) => format!(r#"subject:"{s}" AND body:"{b}""#),
        (Some(s), None) => format!(r#"subject:"{s}""#),
        (None, Some(b)) => format!(r#"body:"{b}""#),
        (None, None) => String::new(),
    }
}

/// Truncate a bare-name capture at the first connective word, skipping
/// leading stopwords ("from the support team" -> "support team",
/// "sarah about the report" -> "sarah").
fn truncate_name(raw: &str) -> String {
    raw.split_whitespace()
        .skip_while(|word| SENDER_STOPWORDS.contains(word))
        .take_while(|word| !NAME_CONNECTIVES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['.', ','])
        .to_string()
}

/// Drop leading filler tokens and bare numbers from a loose capture
fn strip_leading_filler(raw: &str) -> String {
    raw.split_whitespace()
        .skip_while(|word| {
            KEYWORD_FILLER.contains(word) || word.chars().all(|c| c.is_ascii_digit())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
