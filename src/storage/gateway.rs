//! Storage Gateway
//!
//! The only component that touches the store file.
//!
//! ## Access Discipline
//! Every operation runs the same sequence while holding `lock`:
//!
//! ```text
//! lock → open connection → act → close connection → unlock
//! ```
//!
//! No handle outlives an operation, so a failed statement cannot leave an
//! open transaction behind for the next caller. The guard is released on
//! every exit path, including errors and panics.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{Batch, Connection, Statement};

use crate::error::Result;

use super::report::{Report, REPORT_ACK};
use super::schema::{ENABLE_FOREIGN_KEYS, SCHEMA};
use super::{Outcome, Row};

/// Failure text when a frame carries more than one statement
pub const MULTIPLE_STATEMENTS: &str = "You can only execute one statement at a time.";

/// Serialized access point for the shared store
///
/// ## Concurrency:
/// - `lock`: one operation at a time across all connections, no fairness
/// - `report_sink`: only written after the store lock has been released
pub struct StorageGateway {
    /// Path of the SQLite store file
    path: PathBuf,

    /// Exclusive-access boundary around the store
    lock: Mutex<()>,

    /// Where rendered server reports are written (stdout by default)
    report_sink: Mutex<Box<dyn Write + Send>>,
}

impl StorageGateway {
    /// Open a gateway over the store at `path`
    ///
    /// Creates the parent directory and the schema if they are missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let gateway = Self {
            path,
            lock: Mutex::new(()),
            report_sink: Mutex::new(Box::new(io::stdout())),
        };

        gateway.with_connection(|conn| conn.execute_batch(SCHEMA))?;
        tracing::info!("Database initialized at {}", gateway.path.display());

        Ok(gateway)
    }

    /// Replace the sink that receives rendered reports
    pub fn with_report_sink(self, sink: impl Write + Send + 'static) -> Self {
        *self.report_sink.lock() = Box::new(sink);
        self
    }

    /// Run a mutating statement
    ///
    /// Rows produced by the statement, if any, are read and discarded.
    /// Text with nothing to run (empty, whitespace, comments) succeeds.
    pub fn execute(&self, statement: &str) -> Outcome {
        let result = self.with_connection(|conn| {
            if let Some(mut stmt) = prepare_single(conn, statement)? {
                let mut rows = stmt.query([])?;
                while rows.next()?.is_some() {}
            }
            Ok(())
        });

        match result {
            Ok(()) => Outcome::Executed,
            Err(e) => failed("Execute", e),
        }
    }

    /// Run a row-returning statement and collect the full result set
    pub fn query(&self, statement: &str) -> Outcome {
        let result = self.with_connection(|conn| {
            let mut stmt = match prepare_single(conn, statement)? {
                Some(stmt) => stmt,
                None => return Ok(Vec::new()),
            };
            let column_count = stmt.column_count();
            let mut rows = stmt.query([])?;

            let mut collected: Vec<Row> = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(column_count);
                for idx in 0..column_count {
                    values.push(row.get::<_, Value>(idx)?);
                }
                collected.push(values);
            }
            Ok(collected)
        });

        match result {
            Ok(rows) => Outcome::Rows(rows),
            Err(e) => failed("Query", e),
        }
    }

    /// Print the server report to the report sink and acknowledge
    pub fn snapshot(&self) -> Outcome {
        let report = match self.collect_report() {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Error generating report: {}", e);
                return Outcome::Failed(e.to_string());
            }
        };

        if let Err(e) = self.emit_report(&report) {
            tracing::error!("Error printing report: {}", e);
            return Outcome::Failed(e.to_string());
        }

        tracing::info!(
            accounts = report.accounts.len(),
            sessions = report.sessions.len(),
            uploads = report.uploads.len(),
            "Server report printed"
        );

        Outcome::Acknowledged(REPORT_ACK.to_string())
    }

    /// Read the current report contents without printing them
    pub fn collect_report(&self) -> rusqlite::Result<Report> {
        self.with_connection(Report::collect)
    }

    fn emit_report(&self, report: &Report) -> io::Result<()> {
        let mut sink = self.report_sink.lock();
        write!(sink, "{}", report)?;
        sink.flush()
    }

    /// Hold the lock for one open → act → close cycle
    fn with_connection<T, F>(&self, act: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let _guard = self.lock.lock();

        let conn = Connection::open(&self.path)?;
        conn.execute_batch(ENABLE_FOREIGN_KEYS)?;

        let result = act(&conn);
        let closed = conn.close().map_err(|(_, e)| e);

        let value = result?;
        closed?;
        Ok(value)
    }

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Prepare exactly one statement from `sql`
///
/// `None` when the text holds no statement at all. A second statement is
/// rejected before anything runs.
fn prepare_single<'c>(conn: &'c Connection, sql: &str) -> rusqlite::Result<Option<Statement<'c>>> {
    let mut batch = Batch::new(conn, sql);
    let first = batch.next()?;

    if first.is_some() && batch.next()?.is_some() {
        return Err(rusqlite::Error::MultipleStatement);
    }

    Ok(first)
}

fn failed(operation: &str, e: rusqlite::Error) -> Outcome {
    tracing::debug!("{} failed: {}", operation, e);
    match e {
        rusqlite::Error::MultipleStatement => Outcome::Failed(MULTIPLE_STATEMENTS.to_string()),
        other => Outcome::Failed(other.to_string()),
    }
}
