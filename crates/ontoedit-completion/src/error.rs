//! Error types for the completion engine

use thiserror::Error;

/// Result type for completion operations
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Errors that can occur while computing or applying completions
///
/// None of these ever reach the user: the controller logs them and falls back to
/// "no candidates" or "no mutation".
#[derive(Debug, Error)]
pub enum CompletionError {
    /// An offset or span lies outside the document
    #[error("document access out of range: offset {offset}, length {len}")]
    DocumentAccess { offset: usize, len: usize },

    /// The expression checker failed without structured expectations
    #[error("expression checker failed: {0}")]
    Checker(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompletionError {
    pub(crate) fn out_of_range(offset: usize, len: usize) -> Self {
        Self::DocumentAccess { offset, len }
    }
}
