//! Error types for registry discovery and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DirectoryError.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors that can occur while discovering or loading registries.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Failed to read a registry file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry file exceeds size limit.
    #[error("file '{path}' exceeds size limit: {size} bytes > {limit} bytes")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// Registry file content is not a map of patterns to properties.
    #[error("failed to parse registry '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// Registry file extension is not a known format.
    #[error("unsupported registry format for '{path}'")]
    UnsupportedFormat { path: PathBuf },

    /// The discovery start path does not exist or cannot be inspected.
    #[error("cannot inspect '{path}': {source}")]
    StartPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirectoryError {
    /// Create a FileRead error.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a Parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
