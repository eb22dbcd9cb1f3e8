//! Orderings used to rank messages in heaps.

use std::cmp::Ordering;

use crate::message::MailMessage;

/// Ranks by priority, then by recency (newer first), then by identifier.
#[derive(Debug, Clone)]
pub struct ByPriority(pub MailMessage);

impl ByPriority {
    fn key(&self) -> (u8, i64, u32, u64) {
        let m = &self.0;
        (
            m.priority.value(),
            m.timestamp.timestamp(),
            m.timestamp.timestamp_subsec_nanos(),
            m.id.0,
        )
    }
}

impl PartialEq for ByPriority {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ByPriority {}

impl PartialOrd for ByPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Ranks by recency alone (newer first), tie-broken by identifier.
#[derive(Debug, Clone)]
pub struct ByRecency(pub MailMessage);

impl PartialEq for ByRecency {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByRecency {}

impl PartialOrd for ByRecency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByRecency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .timestamp
            .cmp(&other.0.timestamp)
            .then(self.0.id.cmp(&other.0.id))
    }
}
