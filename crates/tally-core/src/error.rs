//! Error types for tally.

use thiserror::Error;

/// Result type alias using tally's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tally operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input defect (missing question, malformed form)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Archive could not be opened, read, or unpacked
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Tabular file could not be read or parsed
    #[error("Table parse error: {0}")]
    TableParse(String),

    /// Text generation failed or produced nothing usable
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
