//! Core domain logic for Rentbook, a multi-tenant property-management
//! data layer. This crate is the single source of truth for business
//! invariants: account identity, landlord groups, direct messaging,
//! status broadcasts and room assignment.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::LandlordCapability;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{Registration, RegistrationValidationError, Role, User, UserId};
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::group_repo::{GroupId, GroupRepository, GroupSummary, Member, SqliteGroupRepository};
pub use repo::message_repo::{ConversationEntry, MessageRepository, SqliteMessageRepository};
pub use repo::room_repo::{RoomOccupancy, RoomRecord, RoomRepository, SqliteRoomRepository};
pub use repo::status_repo::{SqliteStatusRepository, StatusEntry, StatusId, StatusRepository};
pub use repo::{RepoError, RepoResult};
pub use service::account_registry::AccountRegistry;
pub use service::group_directory::GroupDirectory;
pub use service::message_log::{attachment_marker, parse_attachment, MessageLog};
pub use service::room_ledger::RoomLedger;
pub use service::status_board::StatusBoard;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
