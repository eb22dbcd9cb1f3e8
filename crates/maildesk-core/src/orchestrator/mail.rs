//! Composing, delivering and queue processing.

use tracing::{debug, info, warn};

use super::{ComposeRequest, MailOrchestrator, SendMode};
use crate::message::{Folder, MailMessage, MessageId, Priority};
use crate::store::MailStore;
use crate::{Error, Result};

impl<S: MailStore> MailOrchestrator<S> {
    /// Builds a message from the signed-in account and sends, drafts or
    /// schedules it.
    ///
    /// Every call consumes a fresh identifier, even when the message is
    /// later deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in,
    /// [`Error::InvalidInput`] for an out-of-range priority, a missing
    /// recipient (except for drafts) or a blank draft, or a store error if
    /// the result cannot be saved.
    pub fn compose(&mut self, request: ComposeRequest, mode: SendMode) -> Result<MessageId> {
        let sender = self.session()?;
        let priority = Priority::new(request.priority)?;
        let to = request.to.trim();
        if to.is_empty() && mode != SendMode::Draft {
            return Err(Error::InvalidInput("recipient is required".to_string()));
        }
        if mode == SendMode::Draft && to.is_empty() && request.is_blank() {
            return Err(Error::InvalidInput("draft has no content".to_string()));
        }

        let id = self.allocate_message_id();
        let message = MailMessage::new(id, sender, to, request.subject, request.body)
            .with_priority(priority);

        match mode {
            SendMode::Now => {
                let sent = self.send(message);
                self.persist_session()?;
                sent?;
            }
            SendMode::Draft => {
                self.log_activity(format!("Saved draft: {}", message.subject));
                self.mailbox_mut(Folder::Drafts).add(message);
                self.persist_session()?;
            }
            SendMode::Schedule => {
                self.log_activity(format!("Scheduled email: {}", message.subject));
                self.scheduled.enqueue(message);
            }
        }
        debug!("Composed {id} ({mode:?})");
        Ok(id)
    }

    /// Queues a message for [`process_incoming`](Self::process_incoming).
    ///
    /// The message is stamped with a fresh identifier, which is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or
    /// [`Error::InvalidInput`] if the message is addressed to another
    /// account.
    pub fn enqueue_incoming(&mut self, mut message: MailMessage) -> Result<MessageId> {
        let receiver = self.session()?;
        if message.receiver.trim() != receiver {
            return Err(Error::InvalidInput(format!(
                "incoming message is addressed to {}, not {receiver}",
                message.receiver
            )));
        }
        message.id = self.allocate_message_id();
        let id = message.id;
        self.incoming.enqueue(message);
        Ok(id)
    }

    /// Drains the incoming queue in arrival order, filing each message in
    /// Inbox or Spam.
    ///
    /// Non-spam messages at or above the high-priority threshold also join
    /// the high-importance queue. Returns the number processed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or a store
    /// error if the session cannot be saved.
    pub fn process_incoming(&mut self) -> Result<usize> {
        self.session()?;
        let mut processed = 0;
        while let Ok(mut message) = self.incoming.dequeue() {
            message.is_read = false;
            if self.classify(&message) {
                message.is_spam = true;
                self.log_activity(format!("Filtered spam email: {}", message.subject));
                self.mailbox_mut(Folder::Spam).add(message);
            } else {
                self.log_activity(format!("Received email: {}", message.subject));
                if message.priority.value() >= self.config.high_priority_threshold {
                    self.enqueue_priority(message.clone());
                }
                self.mailbox_mut(Folder::Inbox).add(message);
            }
            processed += 1;
        }

        let inbox = self.mailbox(Folder::Inbox).len();
        if inbox > self.config.max_inbox_size {
            warn!(
                "Inbox holds {inbox} messages, above the configured {}",
                self.config.max_inbox_size
            );
        }
        if processed > 0 {
            self.persist_session()?;
        }
        info!("Processed {processed} incoming messages");
        Ok(processed)
    }

    /// Sends every scheduled message in the order it was scheduled.
    ///
    /// Returns the number sent. A message whose delivery fails is still
    /// filed in Sent, and the rest of the queue is drained before the first
    /// delivery error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or a store
    /// error if delivery or saving fails.
    pub fn process_scheduled(&mut self) -> Result<usize> {
        self.session()?;
        let mut sent = 0;
        let mut failure = None;
        while let Ok(message) = self.scheduled.dequeue() {
            let subject = message.subject.clone();
            match self.send(message) {
                Ok(()) => {
                    self.log_activity(format!("Sent scheduled email: {subject}"));
                    sent += 1;
                }
                Err(e) => {
                    warn!("Scheduled email {subject} not delivered: {e}");
                    failure.get_or_insert(e);
                }
            }
        }
        if sent > 0 || failure.is_some() {
            self.persist_session()?;
        }
        info!("Processed {sent} scheduled messages");
        failure.map_or(Ok(sent), Err)
    }

    /// Takes the most important message from the high-importance queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in.
    pub fn next_priority_message(&mut self) -> Result<Option<MailMessage>> {
        self.session()?;
        let Ok(message) = self.priority.dequeue() else {
            return Ok(None);
        };
        self.log_activity(format!("Processed priority email: {}", message.subject));
        Ok(Some(message))
    }

    /// A folder's messages ranked by priority, newest first among equals.
    #[must_use]
    pub fn messages_by_priority(&self, folder: Folder) -> Vec<MailMessage> {
        self.mailbox(folder).by_priority()
    }

    /// Up to `limit` Inbox messages, newest first.
    #[must_use]
    pub fn organize_by_timestamp(&self, limit: usize) -> Vec<MailMessage> {
        self.mailbox(Folder::Inbox).by_timestamp(limit)
    }

    /// Spam score (0-100) the signed-in account would assign to `sender`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in.
    pub fn spam_probability(&self, sender: &str) -> Result<u8> {
        let receiver = self.session()?;
        Ok(self.graph.spam_probability(sender.trim(), &receiver))
    }

    /// Files a message in Sent, records the recipient, and delivers it.
    ///
    /// The Sent copy stays even when delivery fails.
    pub(super) fn send(&mut self, message: MailMessage) -> Result<()> {
        if let Ok(account) = self.current_account_mut() {
            account.record_contacted(&message.receiver);
        }
        self.log_activity(format!("Sent email: {}", message.subject));
        self.mailbox_mut(Folder::Sent).add(message.clone());
        if !self.deliver(&message)? {
            warn!("{} not delivered: no account {}", message.id, message.receiver);
        }
        Ok(())
    }

    /// Places an unread copy in the recipient's Inbox or Spam.
    ///
    /// Mail to the signed-in account lands in the live mailboxes under a
    /// fresh identifier, so the Sent and received copies stay distinct;
    /// anyone else's folders are loaded, appended to and saved through the
    /// store. Returns false if the recipient is not registered.
    fn deliver(&mut self, message: &MailMessage) -> Result<bool> {
        let recipient = message.receiver.clone();
        if !self.accounts.contains(&recipient) {
            return Ok(false);
        }

        let mut copy = message.clone();
        copy.is_read = false;
        copy.is_spam = self.classify(&copy);
        copy.folder = if copy.is_spam { Folder::Spam } else { Folder::Inbox };

        info!("Delivering {} to {recipient} ({})", copy.id, copy.folder);
        if self.current.as_deref() == Some(recipient.as_str()) {
            copy.id = self.allocate_message_id();
            self.mailbox_mut(copy.folder).add(copy);
        } else {
            let mut folders = self.store.load_messages(&recipient)?;
            folders.push(copy);
            self.store.save_folders(&recipient, &folders)?;
        }
        Ok(true)
    }

    /// Decides whether a received message is spam.
    ///
    /// Self-sent mail is never spam. A keyword hit is decisive when the
    /// filter is enabled; the trust score decides only when a threshold is
    /// configured.
    pub(super) fn classify(&self, message: &MailMessage) -> bool {
        if message.sender == message.receiver {
            return false;
        }
        let keyword = if self.config.spam_filter_enabled {
            self.spam_filter.matching_word(message)
        } else {
            None
        };
        let score = self
            .graph
            .spam_probability(&message.sender, &message.receiver);
        debug!(
            "Spam check for {}: keyword {keyword:?}, trust score {score}",
            message.id
        );
        let distrusted = self
            .config
            .trust_spam_threshold
            .is_some_and(|threshold| score >= threshold);
        keyword.is_some() || distrusted
    }

    fn enqueue_priority(&mut self, message: MailMessage) {
        let subject = message.subject.clone();
        let priority = i32::from(message.priority.value());
        match self.priority.enqueue(message, priority) {
            Ok(()) => self.log_activity(format!("Added high-priority email to queue: {subject}")),
            Err(e) => warn!("High-importance queue rejected {subject}: {e}"),
        }
    }
}
