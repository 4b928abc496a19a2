//! Error types for spanflag
//!
//! Only fatal conditions live here. Degenerate inputs (empty text, empty
//! lexicon, single-class folds) and missing attribution are expressed as
//! `Option`s or sentinel values by the modules that produce them.

use thiserror::Error;

/// Errors that can occur while loading tables, datasets or models
#[derive(Error, Debug)]
pub enum SpanflagError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed lexicon term {term:?}: {reason}")]
    MalformedTerm { term: String, reason: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Empty vocabulary: after pruning, no terms remain in the training corpus")]
    EmptyVocabulary,

    #[error("Model shape mismatch: expected {expected} features, found index {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Cannot split {rows} rows into {k} folds")]
    InvalidFolds { k: usize, rows: usize },

    #[error("Cannot stratify into {k} folds: the largest class has {largest} rows")]
    ClassTooSmall { k: usize, largest: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SpanflagError>;
