//! Error types and handling infrastructure for revlines.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! the library error type. The binary layers `anyhow` on top for context.
//!
//! I/O failures are always wrapped through [`RevLinesError::file_error`] at the
//! call site, so each one says which seek or read went wrong.
//!
//! Every failure of the backward scan surfaces synchronously from the line-pull
//! operation. Nothing is retried and nothing is swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for revlines operations.
#[derive(Error, Debug)]
pub enum RevLinesError {
    /// Seek or read failures on the underlying source, including short reads
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Permission denied accessing file
    #[error("Permission denied accessing file: {path}")]
    PermissionDenied { path: PathBuf },

    /// A single logical line grew past the configured cap before a terminator was found
    #[error("file has a line exceeding {limit} bytes")]
    LineTooLong { limit: usize },

    /// Invalid reader configuration or unreadable configuration file
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Standard Result type for revlines operations.
pub type Result<T> = std::result::Result<T, RevLinesError>;

impl RevLinesError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a LineTooLong error for the given cap
    pub fn line_too_long(limit: usize) -> Self {
        Self::LineTooLong { limit }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}
