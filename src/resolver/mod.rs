//! Resolver module
//!
//! Decides whether directory and file creation is legal in the emulated
//! hierarchy, given existence queries against the object store.

mod operations;

pub use crate::storage::PathState;
pub use operations::{DirectoryPathResolver, PathStateProvider};
