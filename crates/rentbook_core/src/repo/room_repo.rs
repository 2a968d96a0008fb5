//! Room repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provision the fixed room inventory and keep it growing monotonically.
//! - Assign tenants to rooms by display name.
//!
//! # Invariants
//! - Rooms are never deleted or renumbered; `provision` only adds rooms
//!   beyond the current count.
//! - Room listings are ordered numerically even though `room_number` is
//!   stored as text.
//! - A tenant occupies at most one room; assignment clears the previous
//!   room inside the same transaction.
//! - Expected absence (unknown room or tenant name) is a `false` return,
//!   not an error.

use crate::model::user::UserId;
use crate::repo::RepoResult;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Inventory read model: one room and its occupant, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub room_number: String,
    pub tenant_id: Option<UserId>,
}

/// Roster read model: one room joined with its occupant's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub room_number: String,
    pub tenant_name: Option<String>,
}

/// Repository interface for the room inventory.
pub trait RoomRepository {
    /// Ensures rooms numbered `1..=total_rooms` exist. Never shrinks.
    fn provision(&self, total_rooms: u32) -> RepoResult<()>;
    /// Assigns the room to the tenant with that display name (lowest id
    /// wins on duplicates). Returns `false` when the room number or the
    /// tenant does not exist.
    fn assign_by_tenant_name(&self, room_number: &str, tenant_name: &str) -> RepoResult<bool>;
    /// Lists all rooms in numeric order.
    fn list_rooms(&self) -> RepoResult<Vec<RoomRecord>>;
    /// Lists all rooms in numeric order, joined with occupant names.
    fn occupancy(&self) -> RepoResult<Vec<RoomOccupancy>>;
}

/// SQLite-backed room repository.
pub struct SqliteRoomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoomRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RoomRepository for SqliteRoomRepository<'_> {
    fn provision(&self, total_rooms: u32) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let current: u32 = tx.query_row("SELECT COUNT(*) FROM rooms;", [], |row| row.get(0))?;
        if current >= total_rooms {
            return Ok(());
        }

        for number in (current + 1)..=total_rooms {
            tx.execute(
                "INSERT OR IGNORE INTO rooms (room_number) VALUES (?1);",
                [number.to_string()],
            )?;
        }
        tx.commit()?;

        info!(
            "event=rooms_provision module=repo status=ok added={} total={total_rooms}",
            total_rooms - current
        );
        Ok(())
    }

    fn assign_by_tenant_name(&self, room_number: &str, tenant_name: &str) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let tenant_id: Option<UserId> = tx
            .query_row(
                "SELECT id FROM users
                 WHERE name = ?1 AND role = 'tenant'
                 ORDER BY id ASC
                 LIMIT 1;",
                [tenant_name],
                |row| row.get(0),
            )
            .optional()?;
        let Some(tenant_id) = tenant_id else {
            return Ok(false);
        };

        // One room per tenant: vacate any room they already hold.
        tx.execute(
            "UPDATE rooms SET tenant_id = NULL WHERE tenant_id = ?1;",
            [tenant_id],
        )?;
        let changed = tx.execute(
            "UPDATE rooms SET tenant_id = ?1 WHERE room_number = ?2;",
            params![tenant_id, room_number],
        )?;
        if changed == 0 {
            // Unknown room: dropping the transaction restores the vacated
            // room as well.
            return Ok(false);
        }

        tx.commit()?;
        Ok(true)
    }

    fn list_rooms(&self) -> RepoResult<Vec<RoomRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT room_number, tenant_id
             FROM rooms
             ORDER BY CAST(room_number AS INTEGER);",
        )?;
        let mut rows = stmt.query([])?;
        let mut rooms = Vec::new();
        while let Some(row) = rows.next()? {
            rooms.push(RoomRecord {
                room_number: row.get(0)?,
                tenant_id: row.get(1)?,
            });
        }
        Ok(rooms)
    }

    fn occupancy(&self) -> RepoResult<Vec<RoomOccupancy>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.room_number, u.name
             FROM rooms r
             LEFT JOIN users u ON r.tenant_id = u.id
             ORDER BY CAST(r.room_number AS INTEGER);",
        )?;
        let mut rows = stmt.query([])?;
        let mut roster = Vec::new();
        while let Some(row) = rows.next()? {
            roster.push(RoomOccupancy {
                room_number: row.get(0)?,
                tenant_name: row.get(1)?,
            });
        }
        Ok(roster)
    }
}
