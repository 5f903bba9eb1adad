//! Interactive shell
//!
//! Line-oriented commands for exploring the filesystem semantics.

pub mod handlers;
pub mod parser;

pub use handlers::{CommandResult, CommandStatus, handle_command};
pub use parser::{Command, parse_command};
