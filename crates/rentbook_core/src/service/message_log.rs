//! Messaging use-case service and the attachment content grammar.
//!
//! # Responsibility
//! - Expose append/read entry points over the message log.
//! - Own the synthetic marker format used to transmit attachments as
//!   message content.
//!
//! # Invariants
//! - `attachment_marker` and `parse_attachment` round-trip: parsing a
//!   built marker always yields the original file name.
//! - A marker must span the whole content to be recognized; embedded
//!   bracket text in a normal message is not an attachment.

use crate::model::user::{User, UserId};
use crate::repo::message_repo::{ConversationEntry, MessageRepository};
use crate::repo::RepoResult;
use once_cell::sync::Lazy;
use regex::Regex;

static ATTACHMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[Attachment: (.+)\]$").expect("valid attachment regex"));

/// Builds the synthetic message content for a file attachment.
pub fn attachment_marker(file_name: &str) -> String {
    format!("[Attachment: {file_name}]")
}

/// Returns the attached file name when `content` is an attachment marker.
pub fn parse_attachment(content: &str) -> Option<&str> {
    ATTACHMENT_RE
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|matched| matched.as_str())
}

/// Use-case service wrapper for messaging operations.
pub struct MessageLog<R: MessageRepository> {
    repo: R,
}

impl<R: MessageRepository> MessageLog<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends one message between two existing accounts.
    pub fn append(
        &self,
        sender_id: UserId,
        recipient_id: UserId,
        content: &str,
    ) -> RepoResult<()> {
        self.repo.append(sender_id, recipient_id, content)
    }

    /// Returns the two-party conversation, oldest first. Symmetric in its
    /// arguments.
    pub fn conversation(
        &self,
        user_id: UserId,
        partner_id: UserId,
    ) -> RepoResult<Vec<ConversationEntry>> {
        self.repo.conversation(user_id, partner_id)
    }

    /// Returns every account `user_id` has exchanged messages with.
    pub fn conversation_partners(&self, user_id: UserId) -> RepoResult<Vec<User>> {
        self.repo.conversation_partners(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{attachment_marker, parse_attachment};

    #[test]
    fn marker_round_trips_through_parse() {
        let marker = attachment_marker("lease.pdf");
        assert_eq!(marker, "[Attachment: lease.pdf]");
        assert_eq!(parse_attachment(&marker), Some("lease.pdf"));
    }

    #[test]
    fn plain_text_is_not_an_attachment() {
        assert_eq!(parse_attachment("see the [Attachment: note] above"), None);
        assert_eq!(parse_attachment("no water 2pm-4pm"), None);
        assert_eq!(parse_attachment("[Attachment: ]"), None);
    }
}
