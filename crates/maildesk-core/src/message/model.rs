//! Message model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Folder;
use crate::{Error, Result};

/// Unique, monotonically assigned message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Create a new message ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse the display form (`E1001`) or a bare number.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('E')
            .or_else(|| s.strip_prefix('e'))
            .unwrap_or(s);
        digits.parse().ok().map(Self)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Message priority, 0 (lowest) to 5 (highest).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Highest allowed priority.
    pub const MAX: u8 = 5;

    /// Create a priority, rejecting values above [`Priority::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `value` is out of range.
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidInput(format!(
                "priority must be 0-{}, got {value}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mail message.
///
/// Messages are plain values: copies kept in history stacks or queues are
/// independent snapshots of the live message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Unique identifier.
    pub id: MessageId,
    /// Sender address.
    pub sender: String,
    /// Receiver address.
    pub receiver: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Whether the message has been read.
    pub is_read: bool,
    /// Whether the message was classified as spam.
    pub is_spam: bool,
    /// Priority (0-5).
    pub priority: Priority,
    /// Folder the message currently lives in.
    pub folder: Folder,
}

impl MailMessage {
    /// Creates an unread, priority-0 Inbox message stamped with the current time.
    #[must_use]
    pub fn new(
        id: MessageId,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender: sender.into(),
            receiver: receiver.into(),
            subject: subject.into(),
            body: body.into(),
            timestamp: Utc::now(),
            is_read: false,
            is_spam: false,
            priority: Priority::default(),
            folder: Folder::Inbox,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the folder tag.
    #[must_use]
    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.folder = folder;
        self
    }

    /// Sets the creation time.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Marks the message as read.
    pub const fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// Marks the message as unread.
    pub const fn mark_unread(&mut self) {
        self.is_read = false;
    }

    /// Case-insensitive substring search over sender and subject.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.sender.to_lowercase().contains(&query) || self.subject.to_lowercase().contains(&query)
    }
}
