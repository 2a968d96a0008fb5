//! Capability-typed authorization for landlord-only operations.
//!
//! # Responsibility
//! - Turn a role check into an unforgeable token consumed by mutating
//!   group/status operations.
//!
//! # Invariants
//! - A `LandlordCapability` can only be obtained through `verify`, so an
//!   unauthorized mutation cannot be expressed by callers of this crate.
//! - The token pins the account id it was verified for.

use crate::model::user::{Role, UserId};
use crate::repo::account_repo::AccountRepository;
use crate::repo::{RepoError, RepoResult};

/// Proof that an account held the landlord role at verification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandlordCapability {
    landlord_id: UserId,
}

impl LandlordCapability {
    /// Verifies the account and issues a capability token.
    ///
    /// # Errors
    /// - `UserNotFound` when the id does not resolve to an account.
    /// - `RoleDenied` when the account is not a landlord.
    pub fn verify<A: AccountRepository>(accounts: &A, user_id: UserId) -> RepoResult<Self> {
        let user = accounts
            .get_user(user_id)?
            .ok_or(RepoError::UserNotFound(user_id))?;
        if user.role != Role::Landlord {
            return Err(RepoError::RoleDenied(user_id));
        }
        Ok(Self {
            landlord_id: user.id,
        })
    }

    /// The verified landlord account id.
    pub fn landlord_id(&self) -> UserId {
        self.landlord_id
    }
}
