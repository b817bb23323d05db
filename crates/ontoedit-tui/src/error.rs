//! Error types for the terminal editor

use ontoedit_completion::CompletionError;
use thiserror::Error;

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;

/// Main error type for TUI operations
#[derive(Error, Debug)]
pub enum TuiError {
    /// IO errors (terminal, files)
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Completion configuration or vocabulary errors
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Terminal setup errors
    #[error("Terminal error: {message}")]
    Terminal { message: String },
}

impl TuiError {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}
