//! Configuration for SQLFrame
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default listening host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listening port
pub const DEFAULT_PORT: u16 = 7778;

/// Well-known store file, relative to the working directory
pub const DEFAULT_DATABASE_FILE: &str = "stomp_server.db";

/// Main configuration for a SQLFrame instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the single SQLite store file
    pub database_path: PathBuf,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen host
    pub host: String,

    /// TCP listen port (0 picks an ephemeral port)
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` string suitable for binding
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse a port argument, falling back to [`DEFAULT_PORT`] when it is not numeric
    pub fn parse_port(raw: &str) -> u16 {
        let raw = raw.trim();
        match raw.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                tracing::warn!(
                    "Invalid port '{}', falling back to default {}",
                    raw,
                    DEFAULT_PORT
                );
                DEFAULT_PORT
            }
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = path.into();
        self
    }

    /// Set the TCP listen host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the TCP listen port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
