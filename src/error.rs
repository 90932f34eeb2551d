//! Error types for SQLFrame
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SqlFrameError
pub type Result<T> = std::result::Result<T, SqlFrameError>;

/// Unified error type for SQLFrame operations
#[derive(Debug, Error)]
pub enum SqlFrameError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SqlFrameError {
    /// True when the error means the peer went away rather than something broke
    pub fn is_disconnect(&self) -> bool {
        match self {
            SqlFrameError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
