//! Account identity use-case service.
//!
//! # Responsibility
//! - Provide the stable identity entry points consumed by presentation
//!   layers: register-or-login, lookup, profile update.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or the registration
//!   transaction boundary.

use crate::model::user::{Registration, User, UserId};
use crate::repo::account_repo::AccountRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for account identity operations.
pub struct AccountRegistry<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountRegistry<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new account or logs into an existing one.
    ///
    /// # Contract
    /// - Keyed by phone; the same call covers first registration and
    ///   repeat login, returning the account id in both outcomes.
    /// - Landlord logins must present the stored password.
    /// - New landlord accounts get their home group in the same call.
    pub fn register_or_login(&self, request: &Registration) -> RepoResult<UserId> {
        self.repo.register_or_login(request)
    }

    /// Gets one account by id.
    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.repo.get_user(id)
    }

    /// Gets one account by phone.
    pub fn get_user_by_phone(&self, phone: &str) -> RepoResult<Option<User>> {
        self.repo.get_user_by_phone(phone)
    }

    /// Partially updates display name and/or profile picture. Fields that
    /// are absent or empty are left unchanged; the password is not
    /// reachable through this path.
    pub fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        profile_pic: Option<&str>,
    ) -> RepoResult<()> {
        self.repo.update_profile(id, name, profile_pic)
    }
}
