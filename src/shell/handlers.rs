//! Shell command handlers
//!
//! Executes parsed commands against a `BucketFileSystem` and renders the
//! outcome as text. Failures are reported the way the I/O boundary sees
//! them.

use log::info;

use crate::error::{FsError, error_kind_label, to_io_error};
use crate::fs::BucketFileSystem;
use crate::shell::parser::Command;
use crate::storage::{FileStatus, ObjectStore};

const HELP: &str = "Commands: MKDIR p | PUT p text | CAT p | LS [p] | STAT p | RM p | RMR p | CD p | PWD | QUIT\n";

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message.into()),
        }
    }

    fn failed(err: FsError) -> Self {
        let label = error_kind_label(&err);
        let io_err = to_io_error(err);
        Self {
            status: CommandStatus::Failure(label.to_string()),
            message: Some(format!("{}: {}\n", label, io_err)),
        }
    }
}

pub fn handle_command<S: ObjectStore>(
    fs: &mut BucketFileSystem<S>,
    command: &Command,
) -> CommandResult {
    let outcome: Result<String, FsError> = match command {
        Command::Quit => {
            return CommandResult {
                status: CommandStatus::CloseConnection,
                message: Some("Goodbye\n".to_string()),
            };
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Pwd => Ok(format!("{}\n", fs.working_directory())),
        Command::Cd(path) => fs
            .set_working_directory(path)
            .map(|_| format!("{}\n", fs.working_directory())),
        Command::Mkdir(path) => fs
            .mkdirs(path)
            .and_then(|_| fs.make_qualified(path))
            .map(|uri| format!("Created {}\n", uri)),
        Command::Put(path, text) => fs
            .create(path, text.as_bytes(), true)
            .map(|_| format!("Wrote {} byte(s)\n", text.len())),
        Command::Cat(path) => fs.open(path).map(|bytes| {
            let mut text = String::from_utf8_lossy(&bytes).into_owned();
            text.push('\n');
            text
        }),
        Command::Stat(path) => fs.get_file_status(path).map(|status| render_status(&status)),
        Command::Ls(path) => fs
            .list_status(path.as_deref().unwrap_or("."))
            .map(|entries| entries.iter().map(render_status).collect()),
        Command::Rm(path) => fs.delete(path, false).map(render_delete),
        Command::Rmr(path) => fs.delete(path, true).map(render_delete),
        Command::Unknown(raw) => {
            return CommandResult {
                status: CommandStatus::Failure("Unknown".to_string()),
                message: Some(format!("Unknown command: {}\n{}", raw, HELP)),
            };
        }
    };

    match outcome {
        Ok(message) => CommandResult::ok(message),
        Err(err) => {
            info!("Command {:?} failed: {}", command, err);
            CommandResult::failed(err)
        }
    }
}

fn render_status(status: &FileStatus) -> String {
    if status.is_dir {
        format!("d {:>10} {}\n", "-", status.path)
    } else {
        format!("- {:>10} {}\n", status.len, status.path)
    }
}

fn render_delete(deleted: bool) -> String {
    if deleted {
        "Deleted\n".to_string()
    } else {
        "Nothing to delete\n".to_string()
    }
}
