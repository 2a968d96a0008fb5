//! User domain model and registration input.
//!
//! # Responsibility
//! - Define the canonical account record returned by read paths.
//! - Carry registration input through one validated request shape.
//!
//! # Invariants
//! - `phone` is the natural key; two accounts never share one.
//! - `landlord_id` is set iff the account is a tenant registered under a
//!   landlord.
//! - Passwords never appear on the read model; only the account
//!   repository touches the stored value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for every account row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// Account role decided at first registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Password-gated identity; owns one auto-created group and authors
    /// status broadcasts for their tenants.
    Landlord,
    /// Passwordless identity linked to exactly one landlord.
    Tenant,
}

/// Canonical account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Surrogate key assigned by the store.
    pub id: UserId,
    /// Globally unique natural key.
    pub phone: String,
    /// Display name shown in conversations, feeds and rosters.
    pub name: String,
    /// Optional opaque path/URI to a profile picture.
    pub profile_pic: Option<String>,
    pub role: Role,
    /// Owning landlord for tenant accounts; `None` for landlords.
    pub landlord_id: Option<UserId>,
}

/// Validated input for `register_or_login`.
///
/// One request shape covers both first registration and repeat login;
/// the store decides which path applies based on the phone key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub phone: String,
    pub name: String,
    pub role: Role,
    /// Phone of the owning landlord. Required for tenant registrations.
    pub landlord_phone: Option<String>,
    /// Required for landlord registrations. Compared as an opaque string
    /// on repeat logins; hashing is a documented non-goal of this layer.
    pub password: Option<String>,
}

impl Registration {
    /// Builds a landlord registration/login request.
    pub fn landlord(
        phone: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            name: name.into(),
            role: Role::Landlord,
            landlord_phone: None,
            password: Some(password.into()),
        }
    }

    /// Builds a tenant registration/login request.
    pub fn tenant(
        phone: impl Into<String>,
        name: impl Into<String>,
        landlord_phone: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            name: name.into(),
            role: Role::Tenant,
            landlord_phone: Some(landlord_phone.into()),
            password: None,
        }
    }

    /// Checks required fields for the requested role.
    ///
    /// # Errors
    /// - `EmptyPhone` / `EmptyName` when either identity field is blank.
    /// - `MissingLandlordPassword` for landlords without a password.
    /// - `MissingLandlordPhone` for tenants without a landlord reference.
    pub fn validate(&self) -> Result<(), RegistrationValidationError> {
        if self.phone.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyPhone);
        }
        if self.name.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyName);
        }
        match self.role {
            Role::Landlord => {
                if self.password.as_deref().is_none_or(|value| value.is_empty()) {
                    return Err(RegistrationValidationError::MissingLandlordPassword);
                }
            }
            Role::Tenant => {
                if self
                    .landlord_phone
                    .as_deref()
                    .is_none_or(|value| value.trim().is_empty())
                {
                    return Err(RegistrationValidationError::MissingLandlordPhone);
                }
            }
        }
        Ok(())
    }
}

/// Registration input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    EmptyPhone,
    EmptyName,
    MissingLandlordPassword,
    MissingLandlordPhone,
}

impl Display for RegistrationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPhone => write!(f, "phone must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::MissingLandlordPassword => {
                write!(f, "password is required for landlord accounts")
            }
            Self::MissingLandlordPhone => {
                write!(f, "landlord phone is required for tenant accounts")
            }
        }
    }
}

impl Error for RegistrationValidationError {}
