//! Response definitions
//!
//! Represents responses to clients and their text encoding.
//!
//! Query results are flattened row-major into one `|`-joined list with no
//! escaping. A value whose text contains `|` is therefore indistinguishable
//! from two values; existing clients depend on this exact layout.

use rusqlite::types::Value;

use crate::error::{Result, SqlFrameError};
use crate::storage::Outcome;

/// Separator between status and payload, and between result values
pub const FIELD_SEPARATOR: char = '|';

/// Payload of a successful execute
pub const EXECUTED_PAYLOAD: &str = "()";

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

impl Status {
    /// Wire label for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::Error => "ERROR",
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Text after the first separator
    pub payload: String,
}

impl Response {
    /// Create a SUCCESS response with the given payload
    pub fn success(payload: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            payload: payload.into(),
        }
    }

    /// Create the SUCCESS response for a completed execute
    pub fn executed() -> Self {
        Self::success(EXECUTED_PAYLOAD)
    }

    /// Create a SUCCESS response carrying a flattened result set
    pub fn rows(rows: &[Vec<Value>]) -> Self {
        let flat: Vec<String> = rows.iter().flatten().map(render_value).collect();
        Self::success(flat.join(&FIELD_SEPARATOR.to_string()))
    }

    /// Create an ERROR response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            payload: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Wire text without the frame terminator
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.status.as_str(), FIELD_SEPARATOR, self.payload)
    }

    /// Parse wire text received from a server
    pub fn from_wire(text: &str) -> Result<Self> {
        let (label, payload) = text.split_once(FIELD_SEPARATOR).ok_or_else(|| {
            SqlFrameError::Protocol(format!("Response missing separator: {:?}", text))
        })?;

        let status = match label {
            "SUCCESS" => Status::Success,
            "ERROR" => Status::Error,
            other => {
                return Err(SqlFrameError::Protocol(format!(
                    "Unknown response status: {:?}",
                    other
                )))
            }
        };

        Ok(Self {
            status,
            payload: payload.to_string(),
        })
    }

    /// Split the payload into its flat value list
    ///
    /// An empty payload (query with no rows) yields no values.
    pub fn values(&self) -> Vec<&str> {
        if self.payload.is_empty() {
            Vec::new()
        } else {
            self.payload.split(FIELD_SEPARATOR).collect()
        }
    }
}

impl From<Outcome> for Response {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Executed => Response::executed(),
            Outcome::Rows(rows) => Response::rows(&rows),
            Outcome::Acknowledged(message) => Response::success(message),
            Outcome::Failed(message) => Response::error(message),
        }
    }
}

/// Text form of a single column value
///
/// NULL renders as `None` and reals use the `repr` layout the existing
/// clients parse: integral values keep a `.0` suffix, and magnitudes below
/// 1e-4 or from 1e16 up switch to `1e+20` style exponents.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => render_real(*f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

fn render_real(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        let inf = if f > 0.0 { "inf" } else { "-inf" };
        return inf.to_string();
    }

    // `{:e}` gives the shortest round-trip mantissa, e.g. "1.5e-5"
    let scientific = format!("{:e}", f);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = f.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
