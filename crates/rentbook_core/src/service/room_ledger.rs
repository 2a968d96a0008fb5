//! Room inventory use-case service.
//!
//! # Responsibility
//! - Expose provisioning, assignment and roster reads over the room
//!   inventory.

use crate::repo::room_repo::{RoomOccupancy, RoomRecord, RoomRepository};
use crate::repo::RepoResult;

/// Use-case service wrapper for room inventory operations.
pub struct RoomLedger<R: RoomRepository> {
    repo: R,
}

impl<R: RoomRepository> RoomLedger<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Ensures rooms numbered `1..=total_rooms` exist. Growth only; a
    /// smaller total than the current count is a no-op.
    pub fn provision(&self, total_rooms: u32) -> RepoResult<()> {
        self.repo.provision(total_rooms)
    }

    /// Assigns a room to the named tenant (lowest id wins on duplicate
    /// names). Returns `false` when the room or the tenant is unknown.
    pub fn assign_by_tenant_name(
        &self,
        room_number: &str,
        tenant_name: &str,
    ) -> RepoResult<bool> {
        self.repo.assign_by_tenant_name(room_number, tenant_name)
    }

    /// Lists all rooms in numeric order.
    pub fn list_rooms(&self) -> RepoResult<Vec<RoomRecord>> {
        self.repo.list_rooms()
    }

    /// Lists all rooms in numeric order with occupant display names.
    pub fn occupancy(&self) -> RepoResult<Vec<RoomOccupancy>> {
        self.repo.occupancy()
    }
}
