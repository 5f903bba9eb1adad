//! Ancestor conflict checks for mkdir and create

use log::warn;

use crate::error::FsError;
use crate::navigate::FsPath;
use crate::storage::PathState;

/// Answers "does this path exist, and as what?"
pub trait PathStateProvider {
    fn path_state(&self, path: &FsPath) -> Result<PathState, FsError>;
}

impl<P: PathStateProvider + ?Sized> PathStateProvider for &P {
    fn path_state(&self, path: &FsPath) -> Result<PathState, FsError> {
        (**self).path_state(path)
    }
}

/// Enforces hierarchical-filesystem rules over a flat namespace.
///
/// Every check is recomputed from the provider; nothing is cached between
/// calls. Checks are not atomic with later writes by other actors.
pub struct DirectoryPathResolver<'a, P: PathStateProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: PathStateProvider + ?Sized> DirectoryPathResolver<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Fails with `FsError::PathConflict` if any ancestor of `path` is a
    /// file. An existing directory at `path` is fine.
    pub fn ensure_can_create_directory(&self, path: &FsPath) -> Result<(), FsError> {
        self.ensure_no_file_ancestor(path)
    }

    /// Same ancestor rule, applied before writing a file at `path`.
    pub fn ensure_can_create_file(&self, path: &FsPath) -> Result<(), FsError> {
        self.ensure_no_file_ancestor(path)
    }

    fn ensure_no_file_ancestor(&self, path: &FsPath) -> Result<(), FsError> {
        // Every level is queried; a file near the root blocks deep paths too.
        for ancestor in path.ancestors() {
            if self.provider.path_state(&ancestor)? == PathState::File {
                warn!("Refusing to create {}: {} is a file", path, ancestor);
                return Err(FsError::PathConflict {
                    path: path.to_string(),
                    ancestor: ancestor.to_string(),
                });
            }
        }
        Ok(())
    }
}
