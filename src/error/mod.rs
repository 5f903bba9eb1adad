//! Error handling
//!
//! Defines error types and the I/O boundary mapping for the connector.

pub mod handlers;
pub mod types;

pub use handlers::{error_kind_label, handle_error, is_retriable, to_io_error};
pub use types::*;
