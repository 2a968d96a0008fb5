//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate input before SQL mutations.
//! - Repository APIs return semantic errors (`Authentication`,
//!   `UserNotFound`, ...) in addition to DB transport errors.
//! - Multi-statement business operations run inside one `IMMEDIATE`
//!   transaction so partial application is impossible.

use crate::db::DbError;
use crate::model::user::{RegistrationValidationError, UserId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_repo;
pub mod group_repo;
pub mod message_repo;
pub mod room_repo;
pub mod status_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Shared error taxonomy for all repository and service operations.
#[derive(Debug)]
pub enum RepoError {
    /// Registration input is missing a required field.
    Validation(RegistrationValidationError),
    /// Landlord password mismatch on repeat registration/login.
    Authentication { phone: String },
    /// Referenced phone does not resolve to a landlord account.
    LandlordNotFound(String),
    /// Referenced user id does not exist.
    UserNotFound(UserId),
    /// The account exists but lacks the landlord role required by the
    /// attempted operation.
    RoleDenied(UserId),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Authentication { phone } => {
                write!(f, "incorrect password for landlord account `{phone}`")
            }
            Self::LandlordNotFound(phone) => {
                write!(f, "no landlord account registered under phone `{phone}`")
            }
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::RoleDenied(id) => {
                write!(f, "user {id} does not hold the landlord role")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted account data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistrationValidationError> for RepoError {
    fn from(value: RegistrationValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
