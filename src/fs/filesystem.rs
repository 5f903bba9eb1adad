use log::{info, warn};
use std::sync::Arc;

use crate::backoff::{RetryBoundedBackOff, Sleeper, ThreadSleeper};
use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, FsError};
use crate::fs::retrying::RetryingStore;
use crate::navigate::{FsPath, qualify, resolve_path};
use crate::resolver::{DirectoryPathResolver, PathStateProvider};
use crate::storage::{self, FileStatus, ObjectStore, PathState};

/// Hierarchical filesystem view over a flat object store.
///
/// Directories are marker objects (`dir/`) or implied by deeper keys.
/// Store calls are retried on transient failures; everything else surfaces
/// as an `FsError`, convertible to `std::io::Error` at the boundary.
pub struct BucketFileSystem<S> {
    store: RetryingStore<S>,
    scheme: String,
    working_dir: FsPath,
}

impl<S: ObjectStore> BucketFileSystem<S> {
    pub fn new(store: S, config: &ConnectorConfig) -> Result<Self, ConnectorError> {
        let backoff = RetryBoundedBackOff::new(
            config.retry.max_retries,
            config.retry.exponential_backoff(),
        )?;
        let working_dir = resolve_path(&FsPath::root(), &config.scheme, &config.working_directory)?;

        info!(
            "Mounted {}:// (max {} retries, working directory {})",
            config.scheme,
            backoff.max_retries(),
            working_dir
        );

        Ok(Self {
            store: RetryingStore::new(store, backoff, Arc::new(ThreadSleeper)),
            scheme: config.scheme.clone(),
            working_dir,
        })
    }

    /// Replace how the retry loop waits between attempts
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.store.set_sleeper(sleeper);
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The underlying store, without retries
    pub fn store(&self) -> &S {
        self.store.inner()
    }

    pub fn working_directory(&self) -> &FsPath {
        &self.working_dir
    }

    /// Relative paths resolve against the new directory. It need not exist.
    pub fn set_working_directory(&mut self, path: &str) -> Result<(), FsError> {
        self.working_dir = self.resolve(path)?;
        Ok(())
    }

    pub fn resolve(&self, path: &str) -> Result<FsPath, FsError> {
        resolve_path(&self.working_dir, &self.scheme, path)
    }

    /// Canonical `scheme://...` form of a path
    pub fn make_qualified(&self, path: &str) -> Result<String, FsError> {
        Ok(qualify(&self.scheme, &self.resolve(path)?))
    }

    pub fn exists(&self, path: &str) -> Result<bool, FsError> {
        Ok(self.path_state(&self.resolve(path)?)?.exists())
    }

    pub fn get_file_status(&self, path: &str) -> Result<FileStatus, FsError> {
        let path = self.resolve(path)?;
        self.status_of(&path)
    }

    /// Creates `path` and any missing ancestors.
    ///
    /// Fails with `PathConflict` when an ancestor is a file and with
    /// `FileAlreadyExists` when `path` itself is. Existing directories are
    /// left alone.
    pub fn mkdirs(&self, path: &str) -> Result<(), FsError> {
        let path = self.resolve(path)?;
        match self.path_state(&path)? {
            PathState::Directory => return Ok(()),
            PathState::File => return Err(FsError::FileAlreadyExists(path.to_string())),
            PathState::Absent => {}
        }

        DirectoryPathResolver::new(self).ensure_can_create_directory(&path)?;
        self.materialize_directories(&path)?;

        info!("Created directory {}", path);
        Ok(())
    }

    /// Writes `bytes` to `path`, creating parent directories as needed.
    pub fn create(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), FsError> {
        let path = self.resolve(path)?;
        match self.path_state(&path)? {
            PathState::Directory => return Err(FsError::IsADirectory(path.to_string())),
            PathState::File if !overwrite => {
                return Err(FsError::FileAlreadyExists(path.to_string()));
            }
            _ => {}
        }

        DirectoryPathResolver::new(self).ensure_can_create_file(&path)?;
        if let Some(parent) = path.parent() {
            self.materialize_directories(&parent)?;
        }
        self.store.put(&path.object_key(), bytes)?;

        info!("Wrote {} byte(s) to {}", bytes.len(), path);
        Ok(())
    }

    pub fn open(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let path = self.resolve(path)?;
        if path.is_root() {
            return Err(FsError::IsADirectory(path.to_string()));
        }

        match self.store.get(&path.object_key())? {
            Some(bytes) => Ok(bytes),
            None if self.path_state(&path)? == PathState::Directory => {
                Err(FsError::IsADirectory(path.to_string()))
            }
            None => Err(FsError::FileNotFound(path.to_string())),
        }
    }

    /// Returns whether anything was deleted. A non-empty directory needs
    /// `recursive`; the root is never deleted.
    pub fn delete(&self, path: &str, recursive: bool) -> Result<bool, FsError> {
        let path = self.resolve(path)?;
        if path.is_root() {
            warn!("Refusing to delete the root of {}://", self.scheme);
            return Ok(false);
        }

        match self.path_state(&path)? {
            PathState::Absent => Ok(false),
            PathState::File => {
                let deleted = self.store.delete(&path.object_key())?;
                info!("Deleted file {}", path);
                Ok(deleted)
            }
            PathState::Directory => {
                if !recursive && storage::has_children(&self.store, &path)? {
                    return Err(FsError::DirectoryNotEmpty(path.to_string()));
                }
                storage::delete_tree(&self.store, &path)?;
                Ok(true)
            }
        }
    }

    /// Immediate children of a directory, or the status of a file
    pub fn list_status(&self, path: &str) -> Result<Vec<FileStatus>, FsError> {
        let path = self.resolve(path)?;
        match self.path_state(&path)? {
            PathState::Absent => Err(FsError::FileNotFound(path.to_string())),
            PathState::File => Ok(vec![self.status_of(&path)?]),
            PathState::Directory => Ok(storage::list_children(&self.store, &path)?),
        }
    }

    fn status_of(&self, path: &FsPath) -> Result<FileStatus, FsError> {
        match self.path_state(path)? {
            PathState::Absent => Err(FsError::FileNotFound(path.to_string())),
            PathState::Directory => Ok(FileStatus::directory(path.clone())),
            PathState::File => {
                let len = storage::file_len(&self.store, path)?.unwrap_or(0);
                Ok(FileStatus::file(path.clone(), len))
            }
        }
    }

    /// Writes a marker for `path` and each of its ancestors that is absent.
    fn materialize_directories(&self, path: &FsPath) -> Result<(), FsError> {
        for dir in path.ancestors().chain(std::iter::once(path.clone())) {
            if dir.is_root() {
                continue;
            }
            if self.path_state(&dir)? == PathState::Absent {
                self.store.put(&dir.marker_key(), &[])?;
            }
        }
        Ok(())
    }
}

impl<S: ObjectStore> PathStateProvider for BucketFileSystem<S> {
    fn path_state(&self, path: &FsPath) -> Result<PathState, FsError> {
        Ok(storage::path_state(&self.store, path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryObjectStore;

    fn fs() -> BucketFileSystem<InMemoryObjectStore> {
        BucketFileSystem::new(InMemoryObjectStore::new(), &ConnectorConfig::default()).unwrap()
    }

    #[test]
    fn test_negative_retries_rejected_at_mount() {
        let mut config = ConnectorConfig::default();
        config.retry.max_retries = -3;
        let result = BucketFileSystem::new(InMemoryObjectStore::new(), &config);
        assert!(matches!(result, Err(ConnectorError::Backoff(_))));
    }

    #[test]
    fn test_mkdirs_writes_markers() {
        let fs = fs();
        fs.mkdirs("/a/b/c").unwrap();
        assert!(fs.store().get("a/").unwrap().is_some());
        assert!(fs.store().get("a/b/").unwrap().is_some());
        assert!(fs.store().get("a/b/c/").unwrap().is_some());
        assert!(fs.get_file_status("/a/b").unwrap().is_dir);
    }

    #[test]
    fn test_mkdirs_idempotent() {
        let fs = fs();
        fs.mkdirs("/a/b").unwrap();
        fs.mkdirs("/a/b").unwrap();
        assert_eq!(fs.store().len().unwrap(), 2);
    }

    #[test]
    fn test_mkdirs_over_file_fails() {
        let fs = fs();
        fs.create("/a/file", b"x", false).unwrap();
        assert!(matches!(fs.mkdirs("/a/file"), Err(FsError::FileAlreadyExists(_))));
        assert!(matches!(fs.mkdirs("/a/file/sub"), Err(FsError::PathConflict { .. })));
        assert!(!fs.exists("/a/file/sub").unwrap());
    }

    #[test]
    fn test_create_and_open() {
        let fs = fs();
        fs.create("/bucket/dir/obj.txt", b"hello", false).unwrap();
        assert_eq!(fs.open("/bucket/dir/obj.txt").unwrap(), b"hello");
        assert!(fs.get_file_status("/bucket/dir").unwrap().is_dir);
        assert_eq!(fs.get_file_status("/bucket/dir/obj.txt").unwrap().len, 5);

        assert!(matches!(
            fs.create("/bucket/dir/obj.txt", b"again", false),
            Err(FsError::FileAlreadyExists(_))
        ));
        fs.create("/bucket/dir/obj.txt", b"again", true).unwrap();
        assert_eq!(fs.open("/bucket/dir/obj.txt").unwrap(), b"again");

        assert!(matches!(fs.open("/bucket/dir"), Err(FsError::IsADirectory(_))));
        assert!(matches!(fs.open("/bucket/nope"), Err(FsError::FileNotFound(_))));
        assert!(matches!(fs.create("/bucket/dir", b"", true), Err(FsError::IsADirectory(_))));
        assert!(matches!(
            fs.create("/bucket/dir/obj.txt/child", b"", false),
            Err(FsError::PathConflict { .. })
        ));
    }

    #[test]
    fn test_delete() {
        let fs = fs();
        fs.create("/a/b/f1", b"1", false).unwrap();
        fs.create("/a/b/f2", b"2", false).unwrap();
        fs.mkdirs("/a/empty").unwrap();

        assert!(!fs.delete("/missing", false).unwrap());
        assert!(fs.delete("/a/b/f1", false).unwrap());
        assert!(!fs.exists("/a/b/f1").unwrap());

        assert!(matches!(fs.delete("/a/b", false), Err(FsError::DirectoryNotEmpty(_))));
        assert!(fs.delete("/a/empty", false).unwrap());
        assert!(fs.delete("/a", true).unwrap());
        assert!(!fs.exists("/a").unwrap());
        assert!(!fs.delete("/", true).unwrap());
    }

    #[test]
    fn test_list_status() {
        let fs = fs();
        fs.create("/d/x", b"12", false).unwrap();
        fs.mkdirs("/d/sub").unwrap();

        let listing: Vec<String> = fs
            .list_status("/d")
            .unwrap()
            .into_iter()
            .map(|s| s.path.to_string())
            .collect();
        assert_eq!(listing, vec!["/d/sub", "/d/x"]);
        assert_eq!(fs.list_status("/d/x").unwrap().len(), 1);
        assert!(matches!(fs.list_status("/nope"), Err(FsError::FileNotFound(_))));
    }

    #[test]
    fn test_working_directory() {
        let mut fs = fs();
        fs.set_working_directory("/test/hadoop").unwrap();
        fs.mkdirs("existingDir").unwrap();
        assert!(fs.exists("/test/hadoop/existingDir").unwrap());
        assert_eq!(fs.make_qualified("existingDir").unwrap(), "gs://test/hadoop/existingDir");

        fs.set_working_directory("gs:/test").unwrap();
        assert_eq!(fs.working_directory().to_string(), "/test");
        fs.set_working_directory("..").unwrap();
        assert!(fs.working_directory().is_root());
    }
}
