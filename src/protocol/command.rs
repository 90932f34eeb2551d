//! Command definitions
//!
//! Classifies inbound frames into the three request kinds.

/// Reserved keyword that requests a server report
pub const REPORT_KEYWORD: &str = "REPORT";

/// Prefix of row-returning statements
pub const QUERY_PREFIX: &str = "SELECT";

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Report,
    Query,
    Execute,
}

/// A classified command
///
/// Statement variants borrow the original frame text untouched; only the
/// classification looks at a normalized copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Print the server report
    Report,

    /// Run a row-returning statement
    Query { statement: &'a str },

    /// Run a mutating statement
    Execute { statement: &'a str },
}

impl<'a> Command<'a> {
    /// Classify a frame, first match wins:
    /// 1. trimmed, uppercased text equals `REPORT`
    /// 2. trimmed, uppercased text starts with `SELECT`
    /// 3. anything else
    pub fn classify(frame: &'a str) -> Self {
        let normalized = frame.trim().to_uppercase();

        if normalized == REPORT_KEYWORD {
            Command::Report
        } else if normalized.starts_with(QUERY_PREFIX) {
            Command::Query { statement: frame }
        } else {
            Command::Execute { statement: frame }
        }
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Report => CommandType::Report,
            Command::Query { .. } => CommandType::Query,
            Command::Execute { .. } => CommandType::Execute,
        }
    }

    /// Statement text forwarded to storage, if any
    pub fn statement(&self) -> Option<&'a str> {
        match self {
            Command::Report => None,
            Command::Query { statement } | Command::Execute { statement } => Some(statement),
        }
    }
}
