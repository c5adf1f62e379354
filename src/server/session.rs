//! Per-connection session handling
//!
//! Reads command lines from a client, dispatches them against the shared
//! registry, and writes replies. Command execution runs on the blocking pool:
//! hashing at high cost factors takes milliseconds to seconds and must not
//! stall the reactor.

use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::task;

use crate::config::ServerConfig;
use crate::protocol::responses::{self, format_response};
use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::registry::IdentityRegistry;

/// Handles a client session over the command connection.
///
/// - Greets the client, then reads command lines via `BufReader`.
/// - Enforces the configured command length limit.
/// - Dispatches commands through `handle_command` and writes the reply.
pub async fn handle_connection(
    stream: TcpStream,
    client_addr: SocketAddr,
    registry: Arc<IdentityRegistry>,
    config: Arc<ServerConfig>,
) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    info!("Client connected: {}", client_addr);

    if let Err(e) = write_half
        .write_all(format_response(responses::READY, "Saltbox ready").as_bytes())
        .await
    {
        warn!("Failed to greet {}: {}", client_addr, e);
        return;
    }

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                // Client closed the connection
                info!("Connection closed by client {}", client_addr);
                break;
            }
            Ok(_) => {
                // Enforce command length limit
                if line.len() > config.max_command_length {
                    let _ = write_half
                        .write_all(
                            format_response(responses::UNRECOGNIZED, "Command too long")
                                .as_bytes(),
                        )
                        .await;
                    continue;
                }

                // The redacting Debug impl keeps secrets out of the log
                let command = parse_command(line.trim_end_matches("\r\n"));
                info!("Received from {}: {:?}", client_addr, command);

                let task_registry = Arc::clone(&registry);
                let task_config = Arc::clone(&config);
                let result = task::spawn_blocking(move || {
                    handle_command(&command, &task_registry, &task_config)
                })
                .await;

                let result = match result {
                    Ok(result) => result,
                    Err(e) => {
                        error!("Command task failed for {}: {}", client_addr, e);
                        let _ = write_half
                            .write_all(
                                format_response(responses::REJECTED, "Internal server error")
                                    .as_bytes(),
                            )
                            .await;
                        continue;
                    }
                };

                match result.status {
                    CommandStatus::CloseConnection => {
                        if let Some(msg) = result.message {
                            let _ = write_half.write_all(msg.as_bytes()).await;
                        }
                        info!("Client {} requested to quit", client_addr);
                        break;
                    }
                    CommandStatus::Success | CommandStatus::Failure(_) => {
                        if let Some(msg) = result.message {
                            if let Err(e) = write_half.write_all(msg.as_bytes()).await {
                                warn!("Failed to reply to {}: {}", client_addr, e);
                                break;
                            }
                        }
                    }
                }
            }
            Err(e) => {
                error!("Failed to read from {}: {}", client_addr, e);
                break;
            }
        }
    }

    info!("Client {} disconnected", client_addr);
}
