//! Status repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Append to one landlord's status feed.
//! - Read back a single author's timeline, newest first.
//!
//! # Invariants
//! - The feed is append-only; no update or delete path exists.
//! - Timeline ordering is deterministic: `timestamp DESC, id DESC`.
//! - Viewer-to-author resolution lives in the service layer; this
//!   repository only ever fetches one author's timeline.

use crate::model::user::UserId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection};

/// Stable identifier for a status row.
pub type StatusId = i64;

/// One rendered feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Store-assigned insert time, epoch milliseconds.
    pub timestamp: i64,
    pub text: String,
    /// Display name of the posting landlord at read time.
    pub author_name: String,
}

/// Repository interface for the append-only status feed.
pub trait StatusRepository {
    /// Appends one status to `author_id`'s feed.
    fn post(&self, author_id: UserId, text: &str) -> RepoResult<StatusId>;
    /// Returns `author_id`'s statuses, newest first.
    fn timeline_for(&self, author_id: UserId) -> RepoResult<Vec<StatusEntry>>;
}

/// SQLite-backed status repository.
pub struct SqliteStatusRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStatusRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StatusRepository for SqliteStatusRepository<'_> {
    fn post(&self, author_id: UserId, text: &str) -> RepoResult<StatusId> {
        self.conn.execute(
            "INSERT INTO statuses (user_id, status) VALUES (?1, ?2);",
            params![author_id, text],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn timeline_for(&self, author_id: UserId) -> RepoResult<Vec<StatusEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.timestamp, s.status, u.name
             FROM statuses s
             JOIN users u ON s.user_id = u.id
             WHERE u.id = ?1
             ORDER BY s.timestamp DESC, s.id DESC;",
        )?;
        let mut rows = stmt.query([author_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(StatusEntry {
                timestamp: row.get(0)?,
                text: row.get(1)?,
                author_name: row.get(2)?,
            });
        }
        Ok(entries)
    }
}
