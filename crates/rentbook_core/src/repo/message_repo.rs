//! Message repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Append to the immutable message log.
//! - Derive conversations and conversation partners for one account.
//!
//! # Invariants
//! - The log is append-only; no update or delete path exists.
//! - Timestamps are assigned by the store at insert time and are
//!   non-decreasing in insertion order.
//! - Conversation ordering is deterministic: `timestamp ASC, id ASC`.

use crate::model::user::{User, UserId};
use crate::repo::account_repo::{parse_user_row, user_exists};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection};

/// One rendered line of a two-party conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    /// Store-assigned insert time, epoch milliseconds.
    pub timestamp: i64,
    /// Free text; may be an attachment marker (see `parse_attachment`).
    pub content: String,
    /// Display name of the sending account at read time.
    pub sender_name: String,
}

/// Repository interface for the append-only message log.
pub trait MessageRepository {
    /// Appends one message. Both account ids must exist.
    fn append(&self, sender_id: UserId, recipient_id: UserId, content: &str) -> RepoResult<()>;
    /// Returns all messages exchanged between the two accounts, in either
    /// direction, oldest first.
    fn conversation(
        &self,
        user_id: UserId,
        partner_id: UserId,
    ) -> RepoResult<Vec<ConversationEntry>>;
    /// Returns every account that exchanged at least one message with
    /// `user_id`, without duplicates.
    fn conversation_partners(&self, user_id: UserId) -> RepoResult<Vec<User>>;
}

/// SQLite-backed message repository.
pub struct SqliteMessageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMessageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MessageRepository for SqliteMessageRepository<'_> {
    fn append(&self, sender_id: UserId, recipient_id: UserId, content: &str) -> RepoResult<()> {
        if !user_exists(self.conn, sender_id)? {
            return Err(RepoError::UserNotFound(sender_id));
        }
        if !user_exists(self.conn, recipient_id)? {
            return Err(RepoError::UserNotFound(recipient_id));
        }

        self.conn.execute(
            "INSERT INTO messages (sender_id, recipient_id, content) VALUES (?1, ?2, ?3);",
            params![sender_id, recipient_id, content],
        )?;
        Ok(())
    }

    fn conversation(
        &self,
        user_id: UserId,
        partner_id: UserId,
    ) -> RepoResult<Vec<ConversationEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT m.timestamp, m.content, u.name
             FROM messages m
             JOIN users u ON m.sender_id = u.id
             WHERE (m.sender_id = ?1 AND m.recipient_id = ?2)
                OR (m.sender_id = ?2 AND m.recipient_id = ?1)
             ORDER BY m.timestamp ASC, m.id ASC;",
        )?;
        let mut rows = stmt.query(params![user_id, partner_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(ConversationEntry {
                timestamp: row.get(0)?,
                content: row.get(1)?,
                sender_name: row.get(2)?,
            });
        }
        Ok(entries)
    }

    fn conversation_partners(&self, user_id: UserId) -> RepoResult<Vec<User>> {
        // The partner is whichever side of the message is not `user_id`.
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT
                u.id,
                u.phone,
                u.name,
                u.profile_pic,
                u.role,
                u.landlord_id
             FROM messages m
             JOIN users u
               ON u.id = CASE WHEN m.sender_id = ?1 THEN m.recipient_id ELSE m.sender_id END
             WHERE m.sender_id = ?1 OR m.recipient_id = ?1;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut partners = Vec::new();
        while let Some(row) = rows.next()? {
            partners.push(parse_user_row(row)?);
        }
        Ok(partners)
    }
}
