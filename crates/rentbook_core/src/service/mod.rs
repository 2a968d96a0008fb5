//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce the landlord capability rule on mutating group/status paths.
//! - Keep presentation layers decoupled from storage details.

pub mod account_registry;
pub mod group_directory;
pub mod message_log;
pub mod room_ledger;
pub mod status_board;
