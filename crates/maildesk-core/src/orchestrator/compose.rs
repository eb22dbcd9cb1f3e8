//! Outgoing message requests.

/// What to do with a composed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendMode {
    /// File in Sent and deliver to the recipient immediately.
    #[default]
    Now,
    /// File in Drafts without delivering.
    Draft,
    /// Hold in the scheduled queue until it is processed.
    Schedule,
}

/// Fields of a message being composed by the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeRequest {
    /// Recipient address. May be empty for drafts.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Priority, validated against 0-5 when composed.
    pub priority: u8,
}

impl ComposeRequest {
    /// Creates a priority-0 request.
    #[must_use]
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            priority: 0,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Returns true if neither subject nor body has content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.subject.trim().is_empty() && self.body.trim().is_empty()
    }
}
