//! Storage Module
//!
//! Durable SQLite store behind a single exclusion boundary.
//!
//! ## Responsibilities
//! - Create the schema on startup
//! - Serialize every statement against the store
//! - Turn storage errors into failure outcomes at the boundary
//! - Produce the operator report

mod gateway;
mod report;
mod schema;

pub use gateway::{StorageGateway, MULTIPLE_STATEMENTS};
pub use report::{AccountEntry, Report, SessionEntry, UploadEntry, REPORT_ACK};
pub use schema::SCHEMA;

use rusqlite::types::Value;

/// One result row, columns in statement order
pub type Row = Vec<Value>;

/// Result of a gateway operation, before wire encoding
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Mutating statement accepted
    Executed,

    /// Query result set (possibly empty)
    Rows(Vec<Row>),

    /// Report printed; carries the acknowledgment for the client
    Acknowledged(String),

    /// Storage error message
    Failed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}
