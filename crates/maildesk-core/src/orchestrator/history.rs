//! Undo/redo records.

use crate::message::{Folder, MailMessage, MessageId};

/// A reversible folder move.
///
/// `message` is the snapshot taken before the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Message as it was before the move.
    pub message: MailMessage,
    /// Folder the message left.
    pub from: Folder,
    /// Folder the message entered.
    pub to: Folder,
}

impl HistoryEntry {
    /// Records a move of `message` from its current folder to `to`.
    #[must_use]
    pub fn new(message: MailMessage, to: Folder) -> Self {
        let from = message.folder;
        Self { message, from, to }
    }

    /// Identifier of the moved message.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.message.id
    }
}
