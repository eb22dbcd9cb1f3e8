//! Per-folder message aggregate.
//!
//! A [`Mailbox`] owns the canonical ordered list of messages for one folder.
//! Its priority heap and "recent" stack are views kept in step with that
//! list; they are never the source of truth.

mod order;

use crate::collections::{PriorityHeap, Stack};
use crate::message::{Folder, MailMessage, MessageId};
use crate::{Error, Result};

pub use order::{ByPriority, ByRecency};

/// Default size of the "recent" stack.
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

/// One folder's messages.
#[derive(Debug, Clone)]
pub struct Mailbox {
    folder: Folder,
    messages: Vec<MailMessage>,
    priority_view: PriorityHeap<ByPriority>,
    recent: Stack<MailMessage>,
    recent_capacity: usize,
}

impl Mailbox {
    /// Creates an empty mailbox for `folder`.
    #[must_use]
    pub const fn new(folder: Folder) -> Self {
        Self::with_recent_capacity(folder, DEFAULT_RECENT_CAPACITY)
    }

    /// Creates an empty mailbox whose recent stack keeps `capacity` entries.
    #[must_use]
    pub const fn with_recent_capacity(folder: Folder, capacity: usize) -> Self {
        Self {
            folder,
            messages: Vec::new(),
            priority_view: PriorityHeap::unbounded(),
            recent: Stack::new(),
            recent_capacity: capacity,
        }
    }

    /// The folder this mailbox holds.
    #[must_use]
    pub const fn folder(&self) -> Folder {
        self.folder
    }

    /// Appends a message to the canonical list and updates the views.
    ///
    /// The message's folder tag is set to this mailbox's folder.
    pub fn add(&mut self, mut message: MailMessage) {
        message.folder = self.folder;
        // The view heap is unbounded, so insertion cannot fail.
        let _ = self.priority_view.insert(ByPriority(message.clone()));
        self.recent.push(message.clone());
        if self.recent.len() > self.recent_capacity {
            self.rebuild_recent(Some);
        }
        self.messages.push(message);
    }

    /// Removes a message by identifier and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageNotFound`] if no message has that identifier.
    pub fn remove(&mut self, id: MessageId) -> Result<MailMessage> {
        let index = self
            .messages
            .iter()
            .position(|m| m.id == id)
            .ok_or(Error::MessageNotFound(id))?;
        let message = self.messages.remove(index);
        self.rebuild_priority_view();
        self.rebuild_recent(|m| (m.id != id).then_some(m));
        Ok(message)
    }

    /// Looks up a message by identifier.
    #[must_use]
    pub fn find(&self, id: MessageId) -> Option<&MailMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Returns true if the mailbox holds a message with this identifier.
    #[must_use]
    pub fn contains(&self, id: MessageId) -> bool {
        self.find(id).is_some()
    }

    /// Applies `f` to a message in place.
    ///
    /// The folder tag cannot be changed this way; move the message instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageNotFound`] if no message has that identifier.
    pub fn update<F>(&mut self, id: MessageId, f: F) -> Result<&MailMessage>
    where
        F: FnOnce(&mut MailMessage),
    {
        let index = self
            .messages
            .iter()
            .position(|m| m.id == id)
            .ok_or(Error::MessageNotFound(id))?;
        f(&mut self.messages[index]);
        self.messages[index].folder = self.folder;
        self.rebuild_priority_view();
        let updated = self.messages[index].clone();
        self.rebuild_recent(|m| Some(if m.id == id { updated.clone() } else { m }));
        Ok(&self.messages[index])
    }

    /// Canonical list, in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[MailMessage] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the folder is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of unread messages.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }

    /// Marks every message read.
    pub fn mark_all_read(&mut self) {
        for message in &mut self.messages {
            message.mark_read();
        }
        self.rebuild_priority_view();
        self.rebuild_recent(|mut m| {
            m.mark_read();
            Some(m)
        });
    }

    /// The most recently added message, if any.
    #[must_use]
    pub fn recent(&self) -> Option<&MailMessage> {
        self.recent.peek().ok()
    }

    /// The highest-ranked message currently in the folder.
    #[must_use]
    pub fn top_priority(&self) -> Option<&MailMessage> {
        self.priority_view.peek_max().ok().map(|p| &p.0)
    }

    /// Messages ranked by priority, newest first among equals.
    ///
    /// Read-only: the canonical list is left untouched.
    #[must_use]
    pub fn by_priority(&self) -> Vec<MailMessage> {
        let mut heap = PriorityHeap::unbounded();
        for message in &self.messages {
            // Unbounded, so insertion cannot fail.
            let _ = heap.insert(ByPriority(message.clone()));
        }
        heap.drain_sorted().into_iter().map(|p| p.0).collect()
    }

    /// Up to `limit` messages, newest first.
    #[must_use]
    pub fn by_timestamp(&self, limit: usize) -> Vec<MailMessage> {
        let mut heap = PriorityHeap::unbounded();
        for message in &self.messages {
            // Unbounded, so insertion cannot fail.
            let _ = heap.insert(ByRecency(message.clone()));
        }
        let mut out = Vec::with_capacity(limit.min(heap.len()));
        while out.len() < limit {
            match heap.extract_max() {
                Ok(ByRecency(message)) => out.push(message),
                Err(_) => break,
            }
        }
        out
    }

    /// Removes every message and resets the views.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.priority_view.clear();
        self.recent.clear();
    }

    fn rebuild_priority_view(&mut self) {
        self.priority_view.clear();
        for message in &self.messages {
            // Unbounded, so insertion cannot fail.
            let _ = self.priority_view.insert(ByPriority(message.clone()));
        }
    }

    /// Rewrites the recent stack top to bottom through `f`, keeping at most
    /// `recent_capacity` entries. Entries mapped to `None` are dropped.
    fn rebuild_recent<F>(&mut self, f: F)
    where
        F: FnMut(MailMessage) -> Option<MailMessage>,
    {
        let keep: Vec<MailMessage> = self
            .recent
            .iter()
            .cloned()
            .filter_map(f)
            .take(self.recent_capacity)
            .collect();
        self.recent.clear();
        for message in keep.into_iter().rev() {
            self.recent.push(message);
        }
    }
}
