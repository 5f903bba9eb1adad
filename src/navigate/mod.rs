//! Navigate module
//!
//! Path model for the emulated hierarchy, plus URI parsing, working
//! directory resolution and qualification.

mod operations;
pub mod path;

// Re-export public types and functions
pub use operations::{ParsedPath, parse_uri, qualify, resolve_path};
pub use path::FsPath;
