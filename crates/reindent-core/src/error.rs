//! Error types for reindent operations
//!
//! The indentation operations themselves are total over well-formed trees and
//! never return errors. Errors only come from the ambient surface around
//! them, which today is loading an indentation configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reindent operations
#[derive(Debug, Error)]
pub enum ReindentError {
    /// Configuration content could not be parsed or is invalid
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
}

impl ReindentError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReindentError::ConfigError { .. } => ErrorKind::Config,
            ReindentError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}
