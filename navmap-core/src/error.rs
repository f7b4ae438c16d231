//! Typed error handling for navmap.
//!
//! Provides structured errors that library consumers can match on,
//! with full context about what went wrong and where.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for navmap operations.
///
/// This provides typed errors that library consumers can match on,
/// unlike opaque `anyhow::Error` types.
#[derive(Error, Debug)]
pub enum NavmapError {
    /// I/O error when reading a source or config file
    #[error("Read error at {path}: {message}")]
    Read {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// File contents could not be decoded as UTF-8 text
    #[error("Decode error in {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Failure creating the output directory or writing an artifact
    #[error("Output error at {path}: {message}")]
    Output {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl NavmapError {
    /// Create a read error with path context.
    pub fn read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a decode error.
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an output error with path context.
    pub fn output(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error (the scan can continue).
    ///
    /// Unreadable or undecodable source files become per-file skip
    /// diagnostics; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Decode { .. })
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Read { path, .. } => Some(path),
            Self::Decode { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::Output { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for navmap results.
pub type NavmapResult<T> = Result<T, NavmapError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Convert a read failure into a [`NavmapError::Read`] with path context.
    fn with_read_path(self, path: impl Into<PathBuf>) -> NavmapResult<T>;

    /// Convert a write failure into a [`NavmapError::Output`] with path context.
    fn with_output_path(self, path: impl Into<PathBuf>) -> NavmapResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_read_path(self, path: impl Into<PathBuf>) -> NavmapResult<T> {
        self.map_err(|e| NavmapError::read(path, e))
    }

    fn with_output_path(self, path: impl Into<PathBuf>) -> NavmapResult<T> {
        self.map_err(|e| NavmapError::output(path, e))
    }
}
