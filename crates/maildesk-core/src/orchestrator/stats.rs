//! Session statistics.

use serde::Serialize;

use crate::message::Folder;

/// Message counts for one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FolderStats {
    /// The folder.
    pub folder: Folder,
    /// Number of messages.
    pub count: usize,
    /// Number of unread messages.
    pub unread: usize,
}

/// Snapshot of the engine's counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailStats {
    /// Registered accounts.
    pub users: usize,
    /// Per-folder counts, in [`Folder::ALL`] order.
    pub folders: Vec<FolderStats>,
    /// Messages waiting in the scheduled queue.
    pub scheduled: usize,
    /// Messages waiting in the incoming queue.
    pub incoming: usize,
    /// Messages waiting in the high-importance queue.
    pub priority: usize,
    /// Whether an undo is available.
    pub can_undo: bool,
    /// Whether a redo is available.
    pub can_redo: bool,
}

impl MailStats {
    /// Counts for one folder.
    #[must_use]
    pub fn folder(&self, folder: Folder) -> Option<&FolderStats> {
        self.folders.iter().find(|s| s.folder == folder)
    }
}
