//! Error types shared by the catalog, config and server

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the library
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied invalid input (e.g. a zero page size)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Site configuration could not be parsed
    #[error("Configuration error in {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// File system I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Markdown rendering failed
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Whether this error was caused by the caller's input
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}
