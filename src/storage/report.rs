//! Server Report
//!
//! Human-readable snapshot of every account, session and upload in the store.
//! The rendered text goes to the operator's console, never to the client.

use std::fmt;

use rusqlite::types::Value;
use rusqlite::{Connection, Row};

use crate::protocol::render_value;

/// Acknowledgment returned to the client after a report is printed
pub const REPORT_ACK: &str = "Report printed to server console";

const RULE: &str = "========================================";

const ACCOUNTS_QUERY: &str = "SELECT username, registration_date FROM users";
const SESSIONS_QUERY: &str =
    "SELECT username, login_time, logout_time FROM login_history ORDER BY username, login_time DESC";
const UPLOADS_QUERY: &str =
    "SELECT username, filename, game_channel, upload_time FROM file_tracking ORDER BY upload_time DESC";

/// One registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEntry {
    pub username: String,
    pub registration_date: String,
}

/// One login session; `logout_time` is `None` while the session is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub username: String,
    pub login_time: String,
    pub logout_time: Option<String>,
}

/// One uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    pub username: String,
    pub filename: String,
    pub game_channel: String,
    pub upload_time: String,
}

/// Snapshot of the three persisted entity kinds
///
/// Sessions are ordered by account, newest login first within each account.
/// Uploads are ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub accounts: Vec<AccountEntry>,
    pub sessions: Vec<SessionEntry>,
    pub uploads: Vec<UploadEntry>,
}

impl Report {
    /// Read all three sections through an open connection
    pub(crate) fn collect(conn: &Connection) -> rusqlite::Result<Self> {
        let accounts = collect_rows(conn, ACCOUNTS_QUERY, |row| {
            Ok(AccountEntry {
                username: text_column(row, 0)?,
                registration_date: text_column(row, 1)?,
            })
        })?;

        let sessions = collect_rows(conn, SESSIONS_QUERY, |row| {
            Ok(SessionEntry {
                username: text_column(row, 0)?,
                login_time: text_column(row, 1)?,
                logout_time: match row.get::<_, Value>(2)? {
                    Value::Null => None,
                    other => Some(render_value(&other)),
                },
            })
        })?;

        let uploads = collect_rows(conn, UPLOADS_QUERY, |row| {
            Ok(UploadEntry {
                username: text_column(row, 0)?,
                filename: text_column(row, 1)?,
                game_channel: text_column(row, 2)?,
                upload_time: text_column(row, 3)?,
            })
        })?;

        Ok(Self {
            accounts,
            sessions,
            uploads,
        })
    }
}

fn collect_rows<T, F>(conn: &Connection, sql: &str, map: F) -> rusqlite::Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?;
    rows.collect()
}

/// Columns are declared TEXT but SQLite will store whatever it is given
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(render_value(&row.get::<_, Value>(idx)?))
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "       SERVER REPORT       ")?;
        writeln!(f, "{}", RULE)?;

        writeln!(f)?;
        writeln!(f, "[1] Registered Users:")?;
        if self.accounts.is_empty() {
            writeln!(f, "    (No users found)")?;
        }
        for account in &self.accounts {
            writeln!(
                f,
                "    - {} (Registered: {})",
                account.username, account.registration_date
            )?;
        }

        writeln!(f)?;
        writeln!(f, "[2] Login History:")?;
        if self.sessions.is_empty() {
            writeln!(f, "    (No history found)")?;
        }
        let mut current_user: Option<&str> = None;
        for session in &self.sessions {
            if current_user != Some(session.username.as_str()) {
                writeln!(f, "    User: {}", session.username)?;
                current_user = Some(session.username.as_str());
            }
            writeln!(
                f,
                "      Login: {} -> Logout: {}",
                session.login_time,
                session.logout_time.as_deref().unwrap_or("Active")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "[3] Uploaded Files:")?;
        if self.uploads.is_empty() {
            writeln!(f, "    (No files uploaded)")?;
        }
        for upload in &self.uploads {
            writeln!(
                f,
                "    {} (by {} in {}) at {}",
                upload.filename, upload.username, upload.game_channel, upload.upload_time
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{}", RULE)
    }
}
