//! Per-message actions: delete, undo/redo, recovery, flags and search.

use tracing::{debug, info, warn};

use super::{HistoryEntry, MailOrchestrator};
use crate::message::{Folder, MailMessage, MessageId};
use crate::store::MailStore;
use crate::{Error, Result};

impl<S: MailStore> MailOrchestrator<S> {
    /// Moves a message from `folder` to Trash.
    ///
    /// The message is remembered for
    /// [`recover_last_deleted`](Self::recover_last_deleted).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in,
    /// [`Error::InvalidInput`] if `folder` is Trash,
    /// [`Error::MessageNotFound`] if the message is not in `folder`, or a
    /// store error if the session cannot be saved.
    pub fn delete(&mut self, id: MessageId, folder: Folder) -> Result<()> {
        self.trash(id, folder)?;
        self.persist_session()
    }

    /// Like [`delete`](Self::delete), and also records the move for
    /// [`undo`](Self::undo).
    ///
    /// # Errors
    ///
    /// Same as [`delete`](Self::delete).
    pub fn delete_with_undo(&mut self, id: MessageId, folder: Folder) -> Result<()> {
        let before = self.trash(id, folder)?;
        self.record_history(HistoryEntry::new(before, Folder::Trash));
        self.persist_session()
    }

    /// Reverses the most recent recorded move.
    ///
    /// Returns the identifier of the restored message, or `None` if there is
    /// nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or
    /// [`Error::MessageNotFound`] if the message has since left the folder
    /// it was moved to (the record is discarded).
    pub fn undo(&mut self) -> Result<Option<MessageId>> {
        self.session()?;
        let Ok(entry) = self.undo_stack.pop() else {
            return Ok(None);
        };
        let mut message = self.mailbox_mut(entry.to).remove(entry.id()).inspect_err(|_| {
            warn!("Cannot undo {}: no longer in {}", entry.id(), entry.to);
        })?;
        message.is_spam = entry.message.is_spam;
        self.mailbox_mut(entry.from).add(message);

        self.log_activity(format!("Undone operation on email: {}", entry.message.subject));
        let id = entry.id();
        self.redo_stack.push(entry);
        self.persist_session()?;
        Ok(Some(id))
    }

    /// Re-applies the most recently undone move.
    ///
    /// Returns the identifier of the moved message, or `None` if there is
    /// nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or
    /// [`Error::MessageNotFound`] if the message has since left the folder
    /// it was restored to (the record is discarded).
    pub fn redo(&mut self) -> Result<Option<MessageId>> {
        self.session()?;
        let Ok(entry) = self.redo_stack.pop() else {
            return Ok(None);
        };
        let mut message = self.mailbox_mut(entry.from).remove(entry.id()).inspect_err(|_| {
            warn!("Cannot redo {}: no longer in {}", entry.id(), entry.from);
        })?;
        if entry.to == Folder::Spam {
            message.is_spam = true;
        }
        self.mailbox_mut(entry.to).add(message);

        self.log_activity(format!("Redone operation on email: {}", entry.message.subject));
        let id = entry.id();
        self.undo_stack.push(entry);
        self.persist_session()?;
        Ok(Some(id))
    }

    /// Returns the most recently deleted message to Inbox.
    ///
    /// The message is taken out of Trash if it is still there. Returns `None`
    /// if nothing has been deleted this session, or if the message already
    /// lives in another folder (for example after an undo); that record is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or a store
    /// error if the session cannot be saved.
    pub fn recover_last_deleted(&mut self) -> Result<Option<MessageId>> {
        self.session()?;
        let Ok(snapshot) = self.deleted.pop() else {
            return Ok(None);
        };
        let id = snapshot.id;
        let message = match self.mailbox_mut(Folder::Trash).remove(id) {
            Ok(message) => message,
            Err(_) => {
                if let Some((folder, _)) = self.find_message(id) {
                    debug!("Not recovering {id}: already in {folder}");
                    return Ok(None);
                }
                snapshot
            }
        };
        self.mailbox_mut(Folder::Inbox).add(message);
        self.log_activity(format!("Recovered email: {id}"));
        self.persist_session()?;
        Ok(Some(id))
    }

    /// Moves a message to Important. Undoable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in,
    /// [`Error::MessageNotFound`] if no folder holds the message, or a store
    /// error if the session cannot be saved.
    pub fn mark_important(&mut self, id: MessageId) -> Result<()> {
        self.move_to(id, Folder::Important, false)
    }

    /// Moves a message to Spam and flags it as spam. Undoable.
    ///
    /// # Errors
    ///
    /// Same as [`mark_important`](Self::mark_important).
    pub fn mark_spam(&mut self, id: MessageId) -> Result<()> {
        self.move_to(id, Folder::Spam, true)
    }

    /// Marks a message read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in,
    /// [`Error::MessageNotFound`] if no folder holds the message, or a store
    /// error if the session cannot be saved.
    pub fn mark_read(&mut self, id: MessageId) -> Result<()> {
        self.update_message(id, MailMessage::mark_read)
    }

    /// Marks a message unread.
    ///
    /// # Errors
    ///
    /// Same as [`mark_read`](Self::mark_read).
    pub fn mark_unread(&mut self, id: MessageId) -> Result<()> {
        self.update_message(id, MailMessage::mark_unread)
    }

    /// Permanently removes everything in Trash and returns how many messages
    /// were removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or a store
    /// error if the session cannot be saved.
    pub fn empty_trash(&mut self) -> Result<usize> {
        self.session()?;
        let removed = self.mailbox(Folder::Trash).len();
        self.mailbox_mut(Folder::Trash).clear();
        self.log_activity(format!("Emptied trash: {removed} messages"));
        self.persist_session()?;
        Ok(removed)
    }

    /// Messages in any folder whose sender or subject contains `query`,
    /// ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<(Folder, MailMessage)> {
        self.mailboxes
            .iter()
            .flat_map(|mailbox| {
                mailbox
                    .messages()
                    .iter()
                    .filter(|m| m.matches(query))
                    .map(|m| (mailbox.folder(), m.clone()))
            })
            .collect()
    }

    /// First folder (in [`Folder::ALL`] order) holding `id`, with the message.
    #[must_use]
    pub fn find_message(&self, id: MessageId) -> Option<(Folder, &MailMessage)> {
        self.mailboxes
            .iter()
            .find_map(|mailbox| mailbox.find(id).map(|m| (mailbox.folder(), m)))
    }

    /// Removes a message from `folder`, files it in Trash, and returns the
    /// message as it was before the move.
    fn trash(&mut self, id: MessageId, folder: Folder) -> Result<MailMessage> {
        self.session()?;
        if folder == Folder::Trash {
            return Err(Error::InvalidInput(format!("{id} is already in Trash")));
        }
        let message = self.mailbox_mut(folder).remove(id)?;
        self.deleted.push(message.clone());
        self.mailbox_mut(Folder::Trash).add(message.clone());
        info!("Moved {id} from {folder} to Trash");
        self.log_activity(format!("Deleted email: {}", message.subject));
        Ok(message)
    }

    fn move_to(&mut self, id: MessageId, to: Folder, spam: bool) -> Result<()> {
        self.session()?;
        let from = self
            .find_message(id)
            .map(|(folder, _)| folder)
            .ok_or(Error::MessageNotFound(id))?;
        if from == to {
            return Ok(());
        }
        let before = self.mailbox_mut(from).remove(id)?;
        let mut moved = before.clone();
        if spam {
            moved.is_spam = true;
        }
        self.mailbox_mut(to).add(moved);
        self.log_activity(format!("Moved email to {to}: {}", before.subject));
        self.record_history(HistoryEntry::new(before, to));
        self.persist_session()
    }

    fn update_message(&mut self, id: MessageId, f: fn(&mut MailMessage)) -> Result<()> {
        self.session()?;
        let folder = self
            .find_message(id)
            .map(|(folder, _)| folder)
            .ok_or(Error::MessageNotFound(id))?;
        self.mailbox_mut(folder).update(id, f)?;
        self.persist_session()
    }

    /// Pushes an undoable move. A new move invalidates anything undone.
    fn record_history(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::MailConfig;
    use crate::orchestrator::{ComposeRequest, SendMode};
    use crate::store::MemoryStore;

    fn with_inbox(subjects: &[&str]) -> (MailOrchestrator<MemoryStore>, Vec<MessageId>) {
        let mut mail = MailOrchestrator::new(MemoryStore::new(), MailConfig::default()).unwrap();
        mail.create_account("Alice", "alice@x", "p1").unwrap();
        mail.login("alice@x", "p1").unwrap();
        let ids = subjects
            .iter()
            .map(|s| {
                let message = MailMessage::new(MessageId::new(0), "bob@y", "alice@x", *s, "");
                mail.enqueue_incoming(message).unwrap()
            })
            .collect();
        mail.process_incoming().unwrap();
        (mail, ids)
    }

    #[test]
    fn test_delete_from_trash_is_rejected() {
        let (mut mail, ids) = with_inbox(&["a"]);
        mail.delete(ids[0], Folder::Inbox).unwrap();
        assert!(matches!(
            mail.delete(ids[0], Folder::Trash),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_delete_missing_message() {
        let (mut mail, _) = with_inbox(&[]);
        assert!(matches!(
            mail.delete(MessageId::new(9999), Folder::Inbox),
            Err(Error::MessageNotFound(_))
        ));
    }

    #[test]
    fn test_undo_redo_mark_spam() {
        let (mut mail, ids) = with_inbox(&["a"]);
        mail.mark_spam(ids[0]).unwrap();
        assert!(mail.folder(Folder::Spam).find(ids[0]).unwrap().is_spam);

        assert_eq!(mail.undo().unwrap(), Some(ids[0]));
        let restored = mail.folder(Folder::Inbox).find(ids[0]).unwrap();
        assert!(!restored.is_spam);
        assert!(mail.folder(Folder::Spam).is_empty());

        assert_eq!(mail.redo().unwrap(), Some(ids[0]));
        assert!(mail.folder(Folder::Spam).contains(ids[0]));
        assert!(mail.folder(Folder::Inbox).is_empty());
    }

    #[test]
    fn test_new_move_clears_redo() {
        let (mut mail, ids) = with_inbox(&["a", "b"]);
        mail.delete_with_undo(ids[0], Folder::Inbox).unwrap();
        mail.undo().unwrap();
        assert!(mail.stats().can_redo);
        mail.mark_important(ids[1]).unwrap();
        assert!(!mail.stats().can_redo);
        assert_eq!(mail.redo().unwrap(), None);
    }

    #[test]
    fn test_undo_after_trash_emptied() {
        let (mut mail, ids) = with_inbox(&["a"]);
        mail.delete_with_undo(ids[0], Folder::Inbox).unwrap();
        assert_eq!(mail.empty_trash().unwrap(), 1);
        assert!(matches!(mail.undo(), Err(Error::MessageNotFound(_))));
        assert!(!mail.stats().can_undo);
    }

    #[test]
    fn test_recover_after_undo_keeps_single_copy() {
        let (mut mail, ids) = with_inbox(&["a"]);
        mail.delete_with_undo(ids[0], Folder::Inbox).unwrap();
        assert_eq!(mail.undo().unwrap(), Some(ids[0]));

        assert_eq!(mail.recover_last_deleted().unwrap(), None);
        assert_eq!(mail.folder(Folder::Inbox).len(), 1);
        assert!(mail.folder(Folder::Trash).is_empty());
        assert_eq!(mail.recover_last_deleted().unwrap(), None);
    }

    #[test]
    fn test_recover_after_undo_from_sent() {
        let (mut mail, _) = with_inbox(&[]);
        let id = mail
            .compose(ComposeRequest::new("bob@y", "s", "b"), SendMode::Now)
            .unwrap();
        mail.delete_with_undo(id, Folder::Sent).unwrap();
        mail.undo().unwrap();

        assert_eq!(mail.recover_last_deleted().unwrap(), None);
        assert_eq!(mail.find_message(id).map(|(f, _)| f), Some(Folder::Sent));
        assert!(!mail.folder(Folder::Inbox).contains(id));
    }

    #[test]
    fn test_recover_after_trash_emptied() {
        let (mut mail, ids) = with_inbox(&["a"]);
        mail.delete(ids[0], Folder::Inbox).unwrap();
        mail.empty_trash().unwrap();
        assert_eq!(mail.recover_last_deleted().unwrap(), Some(ids[0]));
        assert!(mail.folder(Folder::Inbox).contains(ids[0]));
        assert_eq!(mail.recover_last_deleted().unwrap(), None);
    }

    #[test]
    fn test_mark_read_and_unread() {
        let (mut mail, ids) = with_inbox(&["a"]);
        mail.mark_read(ids[0]).unwrap();
        assert_eq!(mail.folder(Folder::Inbox).unread_count(), 0);
        mail.mark_unread(ids[0]).unwrap();
        assert_eq!(mail.folder(Folder::Inbox).unread_count(), 1);
        assert!(matches!(
            mail.mark_read(MessageId::new(1)),
            Err(Error::MessageNotFound(_))
        ));
    }

    #[test]
    fn test_search_across_folders() {
        let (mut mail, ids) = with_inbox(&["Quarterly report", "Lunch"]);
        mail.mark_important(ids[0]).unwrap();
        mail.compose(ComposeRequest::new("", "Report draft", ""), SendMode::Draft)
            .unwrap();

        let hits: Vec<Folder> = mail.search("REPORT").into_iter().map(|(f, _)| f).collect();
        assert_eq!(hits, [Folder::Drafts, Folder::Important]);
        assert_eq!(mail.search("bob@").len(), 2);
        assert_eq!(
            mail.find_message(ids[1]).map(|(f, m)| (f, m.subject.as_str())),
            Some((Folder::Inbox, "Lunch"))
        );
    }
}
