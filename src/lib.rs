//! # SQLFrame
//!
//! A persistence-backed SQL command server with:
//! - Zero-byte-terminated text frames over TCP
//! - Prefix classification into report / query / execute
//! - A single serialized gateway in front of one SQLite file
//! - Thread-per-connection concurrency
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (Thread per Client Connection)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  frames (text + 0x00)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Router                             │
//! │          REPORT  │  SELECT ...  │  anything else             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Storage Gateway                             │
//! │       (one global lock: open → act → close per call)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │  SQLite file  │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod storage;
pub mod network;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SqlFrameError, Result};
pub use config::Config;
pub use engine::Engine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SQLFrame
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
