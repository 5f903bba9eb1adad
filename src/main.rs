//! bucketfs shell - Entry Point
//!
//! Interactive session over an in-memory bucket, for exercising the
//! directory and retry semantics of the connector.

use log::{error, info};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use bucketfs::error::handle_error;
use bucketfs::shell::{CommandStatus, handle_command, parse_command};
use bucketfs::{BucketFileSystem, ConnectorConfig, ConnectorError, InMemoryObjectStore};

const MAX_COMMAND_LENGTH: usize = 4096;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ConnectorError> {
    let config = ConnectorConfig::load()?;
    let mut fs = BucketFileSystem::new(InMemoryObjectStore::new(), &config)?;

    info!("Launching bucketfs shell for {}://", fs.scheme());

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = String::new();

    loop {
        stdout
            .write_all(format!("{}> ", fs.working_directory()).as_bytes())
            .await?;
        stdout.flush().await?;

        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                info!("End of input, closing session");
                break;
            }
            Ok(_) => {
                if line.len() > MAX_COMMAND_LENGTH {
                    stdout.write_all(b"Command too long\n").await?;
                    continue;
                }
                if line.trim().is_empty() {
                    continue;
                }

                let command = parse_command(&line);
                let result = handle_command(&mut fs, &command);
                if let Some(msg) = result.message {
                    stdout.write_all(msg.as_bytes()).await?;
                }
                if result.status == CommandStatus::CloseConnection {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                return Err(e.into());
            }
        }
    }

    stdout.flush().await?;
    Ok(())
}
