//! Group use-case service.
//!
//! # Responsibility
//! - Gate group mutations behind the landlord capability.
//! - Expose membership and listing reads.
//!
//! # Invariants
//! - Every mutating call takes a `LandlordCapability`; group ownership is
//!   always the verified landlord, never a caller-supplied id.

use crate::auth::LandlordCapability;
use crate::model::user::UserId;
use crate::repo::group_repo::{GroupId, GroupRepository, GroupSummary, Member};
use crate::repo::RepoResult;

/// Use-case service wrapper for group operations.
pub struct GroupDirectory<R: GroupRepository> {
    repo: R,
}

impl<R: GroupRepository> GroupDirectory<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a group owned by the verified landlord.
    ///
    /// The one-group-per-owner convention only binds the registration
    /// bootstrap; landlords may create additional named groups here.
    pub fn create_group(&self, auth: &LandlordCapability, name: &str) -> RepoResult<GroupId> {
        self.repo.create_group(name, auth.landlord_id())
    }

    /// Adds an account to a group. Re-adding is a silent no-op.
    pub fn add_member(
        &self,
        _auth: &LandlordCapability,
        group_id: GroupId,
        user_id: UserId,
    ) -> RepoResult<()> {
        self.repo.add_member(group_id, user_id)
    }

    /// Lists members of one group. No ordering contract.
    pub fn members(&self, group_id: GroupId) -> RepoResult<Vec<Member>> {
        self.repo.members(group_id)
    }

    /// Finds the group owned by `owner_id`, if any.
    pub fn group_for_owner(&self, owner_id: UserId) -> RepoResult<Option<GroupId>> {
        self.repo.group_for_owner(owner_id)
    }

    /// Lists all groups in store-native order.
    pub fn list_groups(&self) -> RepoResult<Vec<GroupSummary>> {
        self.repo.list_groups()
    }
}
