use std::path::PathBuf;

use thiserror::Error;

use crate::types::Origin;

/// Errors raised by the translation store.
///
/// Lookup misses are not errors: `get` and `render` fall back to the key text.
#[derive(Error, Debug)]
pub enum Error {
    /// Document has no usable language key
    #[error("Invalid translation document '{origin}': {reason}")]
    InvalidDocument { origin: Origin, reason: String },

    /// `generate` was called without a baseline and no fallback language is set
    #[error("No baseline language given and no fallback language configured")]
    MissingBaseline,

    /// Placeholder pattern is not a valid regular expression
    #[error("Invalid placeholder pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Placeholder pattern lacks the `placeholder` capture group
    #[error("Placeholder pattern '{pattern}' has no capture group named 'placeholder'")]
    MissingPlaceholderGroup { pattern: String },

    /// The persistence collaborator failed to write a generated document
    #[error("Failed to persist generated document to '{origin}': {source}")]
    Persist {
        origin: Origin,
        #[source]
        source: PersistError,
    },

    /// Translation file glob does not compile
    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidFilePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Translation directory could not be walked
    #[error("Failed to walk translation directory '{}': {source}", dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML document '{origin}': {source}")]
    Yaml {
        origin: Origin,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    pub(crate) fn invalid_document(origin: &Origin, reason: impl Into<String>) -> Self {
        Self::InvalidDocument { origin: origin.clone(), reason: reason.into() }
    }
}

/// Errors a persistence collaborator may report.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    SerializeYaml(#[from] serde_yaml::Error),

    /// Anything else the collaborator wants to surface
    #[error("{0}")]
    Other(String),
}
