//! Filesystem facade
//!
//! The HCFS-style entry points (mkdirs, create, open, delete, list) over a
//! flat object store, with retried store access.

pub mod filesystem;
pub mod retrying;

pub use filesystem::BucketFileSystem;
pub use retrying::RetryingStore;
