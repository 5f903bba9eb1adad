pub mod backoff;
pub mod config;
pub mod error;
pub mod fs;
pub mod navigate;
pub mod resolver;
pub mod shell;
pub mod storage;

pub use backoff::{BackOff, Interval, RetryBoundedBackOff};
pub use crate::config::ConnectorConfig;
pub use error::{BackoffError, ConnectorError, FsError};
pub use fs::BucketFileSystem;
pub use navigate::FsPath;
pub use resolver::{DirectoryPathResolver, PathState, PathStateProvider};
pub use storage::{InMemoryObjectStore, ObjectStore};
