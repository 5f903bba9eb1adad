//! Error handlers
//!
//! Maps filesystem errors onto the standard I/O failure signalling used at
//! the filesystem boundary, and classifies store failures for retrying.

use crate::error::types::{ConnectorError, FsError};
use log::error;
use std::io;

/// Handle a connector error
pub fn handle_error(err: &ConnectorError) {
    error!("bucketfs error: {}", err);
}

/// Convert a filesystem error into the `io::Error` a hierarchical
/// filesystem would have raised. Store failures come back unchanged.
pub fn to_io_error(err: FsError) -> io::Error {
    match err {
        FsError::Storage(e) => e,
        other => io::Error::new(boundary_kind(&other), other),
    }
}

fn boundary_kind(err: &FsError) -> io::ErrorKind {
    match err {
        FsError::PathConflict { .. } => io::ErrorKind::NotADirectory,
        FsError::FileAlreadyExists(_) => io::ErrorKind::AlreadyExists,
        FsError::FileNotFound(_) => io::ErrorKind::NotFound,
        FsError::IsADirectory(_) => io::ErrorKind::IsADirectory,
        FsError::DirectoryNotEmpty(_) => io::ErrorKind::DirectoryNotEmpty,
        FsError::InvalidPath(_) => io::ErrorKind::InvalidInput,
        FsError::Storage(e) => e.kind(),
    }
}

impl From<FsError> for io::Error {
    fn from(err: FsError) -> Self {
        to_io_error(err)
    }
}

/// Short label for an error, used in shell responses
pub fn error_kind_label(err: &FsError) -> &'static str {
    match err {
        FsError::PathConflict { .. } => "ParentNotDirectory",
        FsError::FileAlreadyExists(_) => "FileAlreadyExists",
        FsError::FileNotFound(_) => "FileNotFound",
        FsError::IsADirectory(_) => "IsADirectory",
        FsError::DirectoryNotEmpty(_) => "DirectoryNotEmpty",
        FsError::InvalidPath(_) => "InvalidPath",
        FsError::Storage(_) => "IOException",
    }
}

/// Whether a store failure is transient and worth another attempt
pub fn is_retriable(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::TimedOut
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::BrokenPipe
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_conflict_maps_to_not_a_directory() {
        let err = to_io_error(FsError::PathConflict {
            path: "/a/b/c".into(),
            ancestor: "/a/b".into(),
        });
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
        assert!(err.to_string().contains("/a/b is a file"));
    }

    #[test]
    fn test_storage_error_passes_through_unchanged() {
        let original = io::Error::new(io::ErrorKind::TimedOut, "bucket unreachable");
        let err: io::Error = FsError::Storage(original).into();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert_eq!(err.to_string(), "bucket unreachable");
    }

    #[test]
    fn test_retriable_kinds() {
        assert!(is_retriable(&io::Error::from(io::ErrorKind::TimedOut)));
        assert!(is_retriable(&io::Error::from(io::ErrorKind::ConnectionReset)));
        assert!(!is_retriable(&io::Error::from(io::ErrorKind::NotFound)));
        assert!(!is_retriable(&io::Error::from(io::ErrorKind::PermissionDenied)));
    }
}
