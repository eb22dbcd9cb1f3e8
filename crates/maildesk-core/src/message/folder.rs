//! Folder tags.

use serde::{Deserialize, Serialize};

/// One of the six folders every account has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Folder {
    /// Received mail.
    #[default]
    Inbox,
    /// Mail sent by the account owner.
    Sent,
    /// Unsent drafts.
    Drafts,
    /// Mail classified as spam.
    Spam,
    /// Deleted mail.
    Trash,
    /// Mail flagged as important.
    Important,
}

impl Folder {
    /// All folders in display order.
    pub const ALL: [Self; 6] = [
        Self::Inbox,
        Self::Sent,
        Self::Drafts,
        Self::Spam,
        Self::Trash,
        Self::Important,
    ];

    /// Parse a folder name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inbox" => Some(Self::Inbox),
            "sent" => Some(Self::Sent),
            "drafts" => Some(Self::Drafts),
            "spam" => Some(Self::Spam),
            "trash" => Some(Self::Trash),
            "important" => Some(Self::Important),
            _ => None,
        }
    }

    /// Canonical name of the folder.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Sent => "Sent",
            Self::Drafts => "Drafts",
            Self::Spam => "Spam",
            Self::Trash => "Trash",
            Self::Important => "Important",
        }
    }

    /// Position of the folder in [`Folder::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
