// Error types for the analysis engine.
//
// Degenerate input (empty documents, empty vocabularies, short sequences)
// never produces an error; every statistic has a defined fallback. These
// variants cover broken input contracts and bad group lookups only.

use thiserror::Error;

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A document arrived without one of its token sequences, or without an id
    #[error("Malformed document '{id}': {reason}")]
    MalformedDocument { id: String, reason: String },

    /// Two documents share an identifier within one run
    #[error("Duplicate document id '{id}'")]
    DuplicateDocument { id: String },

    /// A group name was requested that the membership mapping doesn't contain
    #[error("Unknown group '{name}'")]
    UnknownGroup { name: String },

    /// A membership mapping references a document that isn't loaded
    #[error("Group '{group}' references unknown document '{id}'")]
    UnknownDocument { id: String, group: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex_lite::Error),
}

impl AnalysisError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_group(name: impl Into<String>) -> Self {
        Self::UnknownGroup { name: name.into() }
    }
}
