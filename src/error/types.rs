//! Error types
//!
//! Defines domain-specific error types for the backoff controller, the
//! filesystem facade and the connector as a whole.

use std::fmt;
use std::io;

/// Backoff construction errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffError {
    InvalidArgument(String),
}

impl fmt::Display for BackoffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackoffError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for BackoffError {}

/// Filesystem errors surfaced by path resolution and the facade
#[derive(Debug)]
pub enum FsError {
    /// An ancestor of `path` exists as a file.
    PathConflict { path: String, ancestor: String },
    FileAlreadyExists(String),
    FileNotFound(String),
    IsADirectory(String),
    DirectoryNotEmpty(String),
    InvalidPath(String),
    /// Failure reported by the object store, passed through untouched.
    Storage(io::Error),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::PathConflict { path, ancestor } => write!(
                f,
                "Cannot create {}: ancestor {} is a file",
                path, ancestor
            ),
            FsError::FileAlreadyExists(p) => write!(f, "File already exists: {}", p),
            FsError::FileNotFound(p) => write!(f, "File not found: {}", p),
            FsError::IsADirectory(p) => write!(f, "Is a directory: {}", p),
            FsError::DirectoryNotEmpty(p) => write!(f, "Directory not empty: {}", p),
            FsError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            FsError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FsError {
    fn from(error: io::Error) -> Self {
        FsError::Storage(error)
    }
}

/// General connector error that encompasses all error types
#[derive(Debug)]
pub enum ConnectorError {
    Backoff(BackoffError),
    Fs(FsError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorError::Backoff(e) => write!(f, "Backoff error: {}", e),
            ConnectorError::Fs(e) => write!(f, "Filesystem error: {}", e),
            ConnectorError::Config(e) => write!(f, "Configuration error: {}", e),
            ConnectorError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConnectorError {}

impl From<BackoffError> for ConnectorError {
    fn from(error: BackoffError) -> Self {
        ConnectorError::Backoff(error)
    }
}

impl From<FsError> for ConnectorError {
    fn from(error: FsError) -> Self {
        ConnectorError::Fs(error)
    }
}

impl From<config::ConfigError> for ConnectorError {
    fn from(error: config::ConfigError) -> Self {
        ConnectorError::Config(error)
    }
}

impl From<io::Error> for ConnectorError {
    fn from(error: io::Error) -> Self {
        ConnectorError::IoError(error)
    }
}
