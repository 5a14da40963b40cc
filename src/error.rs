//! Error types for git-highlights

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, HighlightsError>;

/// Errors produced while parsing arguments and resolving settings.
///
/// Wrapped errors are rendered into the message and never exposed as a
/// `source`; the alternate `anyhow` format must print each cause once.
#[derive(Debug, Error)]
pub enum HighlightsError {
    /// Command-line arguments were rejected by the parser.
    #[error("{0}")]
    Usage(String),

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config file or environment contained a malformed value.
    #[error("invalid configuration: {0}")]
    Config(Box<figment::Error>),

    #[error("invalid log level '{level}': {reason}")]
    LogFilter { level: String, reason: String },

    #[error("IO error: {0}")]
    Io(std::io::Error),
}

impl From<figment::Error> for HighlightsError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<std::io::Error> for HighlightsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
