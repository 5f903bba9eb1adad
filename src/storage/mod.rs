//! Object storage
//!
//! The flat object store collaborator and the directory semantics derived
//! from its listings.

pub mod object_store;
pub mod operations;
pub mod results;

pub use object_store::{InMemoryObjectStore, ObjectStore};
pub use operations::{delete_tree, file_len, has_children, list_children, path_state};
pub use results::{FileStatus, ObjectInfo, PathState};
