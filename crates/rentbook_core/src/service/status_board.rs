//! Status feed use-case service.
//!
//! # Responsibility
//! - Gate posting behind the landlord capability.
//! - Resolve a viewer to the feed they are entitled to read.
//!
//! # Invariants
//! - Tenants read their landlord's feed; landlords read their own.
//! - The repository below only ever fetches one author's timeline; all
//!   viewer resolution happens here.

use crate::auth::LandlordCapability;
use crate::model::user::{Role, UserId};
use crate::repo::account_repo::AccountRepository;
use crate::repo::status_repo::{StatusEntry, StatusId, StatusRepository};
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for the status feed.
pub struct StatusBoard<S: StatusRepository, A: AccountRepository> {
    statuses: S,
    accounts: A,
}

impl<S: StatusRepository, A: AccountRepository> StatusBoard<S, A> {
    /// Creates a service using the provided repository implementations.
    pub fn new(statuses: S, accounts: A) -> Self {
        Self { statuses, accounts }
    }

    /// Appends one status to the verified landlord's feed.
    pub fn post(&self, auth: &LandlordCapability, text: &str) -> RepoResult<StatusId> {
        self.statuses.post(auth.landlord_id(), text)
    }

    /// Returns the feed the viewer is entitled to read, newest first.
    ///
    /// # Errors
    /// - `UserNotFound` when the viewer id does not resolve.
    /// - `InvalidData` when a persisted tenant carries no landlord link.
    pub fn feed_for(&self, viewer_id: UserId) -> RepoResult<Vec<StatusEntry>> {
        let viewer = self
            .accounts
            .get_user(viewer_id)?
            .ok_or(RepoError::UserNotFound(viewer_id))?;

        let feed_owner = match viewer.role {
            Role::Landlord => viewer.id,
            Role::Tenant => viewer.landlord_id.ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "tenant {viewer_id} has no landlord link in users.landlord_id"
                ))
            })?,
        };

        self.statuses.timeline_for(feed_owner)
    }
}
