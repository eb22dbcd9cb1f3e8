//! Activity log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the action happened.
    pub at: DateTime<Utc>,
    /// Human-readable description.
    pub description: String,
}

impl ActivityEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.at.format("%Y-%m-%d %H:%M:%S"), self.description)
    }
}
