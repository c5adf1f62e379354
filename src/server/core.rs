//! Accept loop
//!
//! Binds the command socket, owns the shared identity registry, and spawns a
//! session task per inbound connection. The registry is constructed here once
//! and injected into every session; there is no process-wide global state.

use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::protocol::responses::{self, format_response};
use crate::registry::IdentityRegistry;
use crate::server::session::handle_connection;

pub struct Server {
    registry: Arc<IdentityRegistry>,
    listener: TcpListener,
    config: Arc<ServerConfig>,
    active_clients: Arc<AtomicUsize>,
}

impl Server {
    /// Binds the command socket and constructs the shared registry.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let socket = config.command_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(ServerError::Io(e));
            }
        };

        Ok(Self {
            registry: Arc::new(IdentityRegistry::new()),
            listener,
            config: Arc::new(config),
            active_clients: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Returns the actual bound address, useful when the configured port is 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs the accept loop until the process is torn down.
    pub async fn run(&self) {
        info!(
            "Starting saltbox server on {} (max {} clients)",
            self.config.command_socket(),
            self.config.max_clients
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if self.active_clients.load(Ordering::SeqCst) >= self.config.max_clients {
                        warn!("Rejecting {}: connection limit reached", addr);
                        tokio::spawn(async move {
                            let mut stream = stream;
                            let _ = stream
                                .write_all(
                                    format_response(
                                        responses::SERVER_BUSY,
                                        "Too many connections. Try again later.",
                                    )
                                    .as_bytes(),
                                )
                                .await;
                        });
                        continue;
                    }

                    self.active_clients.fetch_add(1, Ordering::SeqCst);

                    let registry = Arc::clone(&self.registry);
                    let config = Arc::clone(&self.config);
                    let active_clients = Arc::clone(&self.active_clients);

                    // Spawn a task for each client so the accept loop doesn't block
                    tokio::spawn(async move {
                        handle_connection(stream, addr, registry, config).await;
                        active_clients.fetch_sub(1, Ordering::SeqCst);
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
