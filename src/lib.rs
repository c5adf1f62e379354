pub mod codec;
pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;

pub use config::ServerConfig;
pub use server::Server;
