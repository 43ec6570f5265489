//! Folder classification
//!
//! Maps mailbox vocabulary in an utterance to a canonical folder
//! identifier. Vocabulary groups are checked in a fixed order and the
//! first matching group wins; anything else is INBOX.

use regex::Regex;

use crate::error::Result;

use super::types::DEFAULT_FOLDER;

/// Ordered (vocabulary pattern, canonical folder) table
const FOLDER_GROUPS: &[(&str, &str)] = &[
    (r"\b(?:spam|junk)\b", "[Gmail]/Spam"),
    (r"\b(?:sent|outbox)\b", "[Gmail]/Sent Mail"),
    (r"\bdrafts?\b", "[Gmail]/Drafts"),
    (r"\b(?:trash|deleted|bin)\b", "[Gmail]/Trash"),
    (r"\b(?:important|priority)\b", "[Gmail]/Important"),
    (r"\b(?:all\s+mail|archived?)\b", "[Gmail]/All Mail"),
    (r"\b(?:starred|flagged)\b", "[Gmail]/Starred"),
];

/// Folder classifier
pub struct FolderClassifier {
    groups: Vec<(Regex, &'static str)>,
}

impl FolderClassifier {
    pub fn new() -> Result<Self> {
        let mut groups = Vec::with_capacity(FOLDER_GROUPS.len());
        for (pattern, folder) in FOLDER_GROUPS {
            groups.push((Regex::new(pattern)?, *folder));
        }
        Ok(Self { groups })
    }

    /// Classify the folder an utterance refers to.
    ///
    /// Total function: absence of any mailbox vocabulary yields `INBOX`.
    pub fn classify(&self, text: &str) -> String {
        for (pattern, folder) in &self.groups {
            if pattern.is_match(text) {
                return (*folder).to_string();
            }
        }
        DEFAULT_FOLDER.to_string()
    }
}
