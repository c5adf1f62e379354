//! Configuration management for the Saltbox server
//!
//! Loads settings from config.toml with environment overrides and validates
//! them before the server starts.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::codec::{MAX_COST, MIN_COST};

/// Server configuration, loaded once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the command connection (restart required)
    pub bind_address: String,

    /// Port for the command connection; 0 picks an ephemeral port
    pub port: u16,

    /// Maximum concurrent client connections
    pub max_clients: usize,

    /// Maximum command line length in bytes
    pub max_command_length: usize,

    /// Bcrypt cost factor used when a command omits one
    pub default_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            max_clients: 32,
            max_command_length: 1024,
            default_cost: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Try production path first, then development path
        let config_paths = vec![
            "saltbox-server/config", // Docker production: /app/saltbox-server/config.toml
            "config",                // Local development: ./config.toml
        ];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("SALTBOX"))
                .build()
            {
                Ok(settings) => {
                    let config: ServerConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            config::ConfigError::Message("no configuration source available".into())
        }))
    }

    /// Get bind address and port as a socket address string
    pub fn command_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.max_clients == 0 {
            return Err(config::ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if !(MIN_COST..=MAX_COST).contains(&self.default_cost) {
            return Err(config::ConfigError::Message(format!(
                "default_cost must be between {} and {}",
                MIN_COST, MAX_COST
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.command_socket(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_default_cost_out_of_range() {
        let config = ServerConfig {
            default_cost: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            default_cost: 32,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_max_clients() {
        let config = ServerConfig {
            max_clients: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_bind_address() {
        let config = ServerConfig {
            bind_address: String::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
