//! Natural-language query extraction
//!
//! Converts a free-form search utterance into a structured
//! [`SearchQuery`] using deterministic pattern matching, no trained
//! model involved.

pub mod assembler;
pub mod entity;
pub mod folder;
pub mod limit;
pub mod temporal;
pub mod types;

pub use assembler::QueryParser;
pub use entity::{EntityExtractor, EntityMatch};
pub use folder::FolderClassifier;
pub use limit::LimitExtractor;
pub use temporal::TemporalResolver;
pub use types::{DateRange, SearchQuery, DEFAULT_FOLDER, DEFAULT_LIMIT, MAX_LIMIT};
