//! Domain model for accounts and registration input.
//!
//! # Responsibility
//! - Define the canonical user record shared by all repositories.
//! - Validate registration input before it reaches persistence.
//!
//! # Invariants
//! - Every account is identified by a stable integer `UserId`.
//! - Role semantics (landlord vs tenant) are decided at registration and
//!   never change afterwards.

pub mod user;
