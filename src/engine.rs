//! Engine Module
//!
//! Routes classified commands to the storage gateway.
//!
//! ## Responsibilities
//! - Open the gateway (and schema) on startup
//! - Classify each frame and dispatch to report / query / execute
//! - Encode the gateway outcome as a wire response

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Command, Response};
use crate::storage::StorageGateway;

/// The command engine shared by every connection
///
/// Holds no per-connection state. The gateway inside is the only shared
/// mutable resource, and it serializes itself.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Serialized access to the store
    gateway: StorageGateway,
}

impl Engine {
    /// Open the engine with the given config
    ///
    /// Fails if the store file cannot be created or the schema cannot be
    /// applied; callers treat that as fatal.
    pub fn open(config: Config) -> Result<Self> {
        let gateway = StorageGateway::open(&config.database_path)?;
        Ok(Self { config, gateway })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified store file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().database_path(path).build();
        Self::open(config)
    }

    /// Replace the sink that receives server reports
    pub fn with_report_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.gateway = self.gateway.with_report_sink(sink);
        self
    }

    /// Classify a frame and execute it
    pub fn handle_frame(&self, frame: &str) -> Response {
        self.execute(Command::classify(frame))
    }

    /// Execute a command and return a response
    pub fn execute(&self, command: Command<'_>) -> Response {
        let outcome = match command {
            Command::Report => self.gateway.snapshot(),
            Command::Query { statement } => self.gateway.query(statement),
            Command::Execute { statement } => self.gateway.execute(statement),
        };
        outcome.into()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the storage gateway
    pub fn gateway(&self) -> &StorageGateway {
        &self.gateway
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
