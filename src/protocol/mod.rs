//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Frame Format
//! ```text
//! ┌─────────────────────────────────────────┬──────┐
//! │               Text                      │ 0x00 │
//! └─────────────────────────────────────────┴──────┘
//! ```
//!
//! ### Requests
//! - `REPORT` (any case, surrounding whitespace ignored): print server report
//! - `SELECT ...`: row-returning statement
//! - anything else: mutating statement
//!
//! ### Responses
//! - `SUCCESS|()`: statement executed
//! - `SUCCESS|v1|v2|...`: query values, row-major
//! - `SUCCESS|<message>`: report acknowledged
//! - `ERROR|<message>`: storage error text

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType, QUERY_PREFIX, REPORT_KEYWORD};
pub use response::{render_value, Response, Status, EXECUTED_PAYLOAD, FIELD_SEPARATOR};
pub use codec::{encode_frame, write_frame, FrameReader, FRAME_TERMINATOR, READ_CHUNK_SIZE};
