//! Group repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own group creation, membership and membership listing.
//!
//! # Invariants
//! - Membership behaves as a set: re-adding an existing member is a
//!   silent no-op (`INSERT OR IGNORE` against the composite key).
//! - Member and group listings carry no ordering contract; callers must
//!   not rely on store-native order.

use crate::model::user::UserId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Stable identifier for a group row.
pub type GroupId = i64;

/// Membership read model: one user inside one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: UserId,
    pub name: String,
}

/// Listing read model for groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub id: GroupId,
    pub name: String,
}

/// Repository interface for group and membership operations.
pub trait GroupRepository {
    /// Creates a group owned by `owner_id`. Callers outside the
    /// registration bootstrap are responsible for the one-group-per-owner
    /// convention.
    fn create_group(&self, name: &str, owner_id: UserId) -> RepoResult<GroupId>;
    /// Adds a member; re-adding is a silent no-op.
    fn add_member(&self, group_id: GroupId, user_id: UserId) -> RepoResult<()>;
    /// Lists members of one group.
    fn members(&self, group_id: GroupId) -> RepoResult<Vec<Member>>;
    /// Finds the group owned by `owner_id`, if any.
    fn group_for_owner(&self, owner_id: UserId) -> RepoResult<Option<GroupId>>;
    /// Lists all groups.
    fn list_groups(&self) -> RepoResult<Vec<GroupSummary>>;
}

/// SQLite-backed group repository.
pub struct SqliteGroupRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGroupRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GroupRepository for SqliteGroupRepository<'_> {
    fn create_group(&self, name: &str, owner_id: UserId) -> RepoResult<GroupId> {
        self.conn.execute(
            "INSERT INTO groups (name, owner_id) VALUES (?1, ?2);",
            params![name, owner_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn add_member(&self, group_id: GroupId, user_id: UserId) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO group_members (group_id, user_id) VALUES (?1, ?2);",
            params![group_id, user_id],
        )?;
        Ok(())
    }

    fn members(&self, group_id: GroupId) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.name
             FROM group_members gm
             JOIN users u ON gm.user_id = u.id
             WHERE gm.group_id = ?1;",
        )?;
        let mut rows = stmt.query([group_id])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(Member {
                user_id: row.get(0)?,
                name: row.get(1)?,
            });
        }
        Ok(members)
    }

    fn group_for_owner(&self, owner_id: UserId) -> RepoResult<Option<GroupId>> {
        let group_id = self
            .conn
            .query_row(
                "SELECT id FROM groups WHERE owner_id = ?1;",
                [owner_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(group_id)
    }

    fn list_groups(&self) -> RepoResult<Vec<GroupSummary>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM groups;")?;
        let mut rows = stmt.query([])?;
        let mut groups = Vec::new();
        while let Some(row) = rows.next()? {
            groups.push(GroupSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            });
        }
        Ok(groups)
    }
}
