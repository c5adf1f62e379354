//! Saltbox Server - Entry Point
//!
//! A small TCP service for salted one-way credential hashing, verification,
//! and an in-memory identity registry.

use log::{error, info};

use saltbox_server::config::ServerConfig;
use saltbox_server::error::ServerError;
use saltbox_server::server::Server;

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::load()?;

    info!("Launching saltbox server...");

    let server = Server::bind(config).await?;
    server.run().await;

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    if let Err(e) = run().await {
        error!("Server startup failed: {}", e);
        std::process::exit(1);
    }
}
