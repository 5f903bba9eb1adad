//! Storage result types
//!
//! Defines result structures returned by storage operations.

use crate::navigate::FsPath;

/// Whether and how a path exists in the emulated hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Absent,
    File,
    Directory,
}

impl PathState {
    pub fn exists(&self) -> bool {
        !matches!(self, PathState::Absent)
    }
}

/// A listed object: its full key and size in bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
}

/// Status of a file or directory, as returned by stat and list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: FsPath,
    pub is_dir: bool,
    pub len: u64,
}

impl FileStatus {
    pub fn file(path: FsPath, len: u64) -> Self {
        Self {
            path,
            is_dir: false,
            len,
        }
    }

    pub fn directory(path: FsPath) -> Self {
        Self {
            path,
            is_dir: true,
            len: 0,
        }
    }
}
