//! Session orchestration.
//!
//! [`MailOrchestrator`] composes the containers, the trust graph and the
//! persistence collaborator into the operations a mail client exposes. At
//! most one account is signed in at a time, and only that account's six
//! mailboxes are held in memory; mail for other accounts is read and written
//! through the [`MailStore`].
//!
//! Operations that change a mailbox or the session fail with
//! [`Error::NotAuthenticated`] while nobody is signed in. Read-only queries
//! return empty results instead.

mod actions;
mod compose;
mod history;
mod mail;
mod social;
mod stats;

use tracing::{debug, info, warn};

use crate::account::{Account, AccountId, validate_registration};
use crate::activity::ActivityEntry;
use crate::collections::{BoundedLog, IndexedStore, PriorityQueue, Queue, Stack};
use crate::config::MailConfig;
use crate::mailbox::Mailbox;
use crate::message::{Folder, MailMessage, MessageId};
use crate::spam::SpamFilter;
use crate::store::{FolderSnapshot, MailStore};
use crate::trust::TrustGraph;
use crate::{Error, Result};

pub use compose::{ComposeRequest, SendMode};
pub use history::HistoryEntry;
pub use stats::{FolderStats, MailStats};

/// First identifier handed out to a message.
pub const FIRST_MESSAGE_ID: u64 = 1001;

/// Default number of messages in the recency report.
pub const DEFAULT_TIMESTAMP_LIMIT: usize = 10;

/// The mailbox engine.
pub struct MailOrchestrator<S: MailStore> {
    config: MailConfig,
    store: S,
    accounts: IndexedStore<String, Account>,
    graph: TrustGraph,
    spam_filter: SpamFilter,
    current: Option<String>,
    mailboxes: [Mailbox; 6],
    navigation: Stack<Folder>,
    deleted: Stack<MailMessage>,
    undo_stack: Stack<HistoryEntry>,
    redo_stack: Stack<HistoryEntry>,
    scheduled: Queue<MailMessage>,
    incoming: Queue<MailMessage>,
    priority: PriorityQueue<MailMessage>,
    activity: BoundedLog<ActivityEntry>,
    next_message_id: u64,
    next_account_id: u64,
}

impl<S: MailStore> MailOrchestrator<S> {
    /// Loads accounts, contacts, the trust graph and the spam word list from
    /// `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the stored data cannot be read.
    pub fn new(store: S, config: MailConfig) -> Result<Self> {
        let mut accounts = IndexedStore::new();
        let mut graph = TrustGraph::new();
        let mut next_message_id = FIRST_MESSAGE_ID;
        let mut next_account_id = 1;

        for stored in store.load_accounts()? {
            let mut account = stored.with_recent_capacity(config.recent_contacts_capacity);
            account.set_contacts(store.load_contacts(&account.email)?);
            if let Some(max) = store.load_messages(&account.email)?.max_id() {
                next_message_id = next_message_id.max(max.0 + 1);
            }
            next_account_id = next_account_id.max(account.id.0 + 1);
            graph.add_account(&account.email);
            accounts.insert(account.email.clone(), account);
        }

        for edge in store.load_trust_graph()? {
            if !graph.add_connection(&edge.a, &edge.b, edge.strength) {
                warn!("Skipping trust edge {} - {}: unknown endpoint", edge.a, edge.b);
            }
        }

        let spam_filter = SpamFilter::new(store.load_spam_words()?);
        info!(
            "Loaded {} accounts, {} spam words",
            accounts.len(),
            spam_filter.words().len()
        );

        Ok(Self {
            mailboxes: Folder::ALL.map(|f| Mailbox::with_recent_capacity(f, config.recent_capacity)),
            priority: PriorityQueue::with_capacity(config.heap_capacity),
            activity: BoundedLog::new(config.activity_log_capacity),
            config,
            store,
            accounts,
            graph,
            spam_filter,
            current: None,
            navigation: Stack::new(),
            deleted: Stack::new(),
            undo_stack: Stack::new(),
            redo_stack: Stack::new(),
            scheduled: Queue::new(),
            incoming: Queue::new(),
            next_message_id,
            next_account_id,
        })
    }

    /// Registers a new account.
    ///
    /// Returns `Ok(false)` if the email is already registered. Registration
    /// does not sign the account in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a field fails validation, or a
    /// store error if the account cannot be saved.
    pub fn create_account(&mut self, name: &str, email: &str, secret: &str) -> Result<bool> {
        validate_registration(name, email, secret).map_err(|errors| {
            let messages: Vec<&str> = errors.iter().map(|e| e.message()).collect();
            Error::InvalidInput(messages.join("; "))
        })?;

        let email = email.trim();
        if self.accounts.contains(&email.to_string()) {
            warn!("Account already exists: {email}");
            return Ok(false);
        }

        let account = Account::new(AccountId::new(self.next_account_id), name.trim(), email, secret)
            .with_recent_capacity(self.config.recent_contacts_capacity);
        self.next_account_id += 1;
        self.store.save_account(&account)?;
        self.graph.add_account(email);
        info!("Account created: {} ({})", account.email, account.id);
        self.accounts.insert(email.to_string(), account);
        self.log_activity(format!("Account created: {email}"));
        Ok(true)
    }

    /// Signs an account in and loads its mail.
    ///
    /// Returns `Ok(false)` for an unknown email or a wrong secret. Signing in
    /// while another account is active signs that account out first.
    ///
    /// # Errors
    ///
    /// Returns a store error if the account's data cannot be read or saved.
    pub fn login(&mut self, email: &str, secret: &str) -> Result<bool> {
        let email = email.trim().to_string();
        let Ok(account) = self.accounts.search_mut(&email) else {
            warn!("Login failed: unknown account {email}");
            return Ok(false);
        };
        if !account.verify_secret(secret) {
            warn!("Login failed: wrong secret for {email}");
            return Ok(false);
        }
        account.touch_login();
        let account = account.clone();

        if self.current.is_some() {
            self.logout()?;
        }

        self.store.save_account(&account)?;
        self.current = Some(email.clone());
        self.load_session(&email)?;
        info!("Logged in: {email}");
        self.log_activity(format!("Logged in: {email}"));
        Ok(true)
    }

    /// Persists the session and signs out.
    ///
    /// Clears the six mailboxes and every session stack and queue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or a store
    /// error if the session cannot be saved.
    pub fn logout(&mut self) -> Result<()> {
        let email = self.session()?;
        if self.config.auto_delete_trash {
            let emptied = self.mailbox(Folder::Trash).len();
            self.mailbox_mut(Folder::Trash).clear();
            debug!("Auto-emptied {emptied} messages from trash");
        }
        self.persist_session()?;
        self.persist_contacts()?;

        if !self.scheduled.is_empty() {
            warn!("Discarding {} unsent scheduled messages", self.scheduled.len());
        }
        for mailbox in &mut self.mailboxes {
            mailbox.clear();
        }
        self.navigation.clear();
        self.deleted.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.scheduled.clear();
        self.incoming.clear();
        self.priority.clear();
        self.current = None;

        info!("Logged out: {email}");
        self.log_activity(format!("Logged out: {email}"));
        Ok(())
    }

    /// Appends an entry to the activity log, evicting the oldest past capacity.
    pub fn log_activity(&mut self, description: impl Into<String>) {
        let entry = ActivityEntry::new(description);
        debug!("Activity: {}", entry.description);
        self.activity.push(entry);
    }

    /// Activity log, oldest first.
    pub fn activity(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> {
        self.activity.iter()
    }

    /// Whether an account is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The signed-in account.
    #[must_use]
    pub fn current_account(&self) -> Option<&Account> {
        self.current
            .as_ref()
            .and_then(|email| self.accounts.search(email).ok())
    }

    /// Looks up a registered account by email.
    #[must_use]
    pub fn account(&self, email: &str) -> Option<&Account> {
        self.accounts.search(&email.trim().to_string()).ok()
    }

    /// One of the signed-in account's folders.
    #[must_use]
    pub fn folder(&self, folder: Folder) -> &Mailbox {
        self.mailbox(folder)
    }

    /// Records a visit to `folder` in the navigation history and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in.
    pub fn open_folder(&mut self, folder: Folder) -> Result<&Mailbox> {
        self.session()?;
        self.navigation.push(folder);
        Ok(self.mailbox(folder))
    }

    /// Leaves the current folder and returns the one visited before it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in.
    pub fn navigate_back(&mut self) -> Result<Option<Folder>> {
        self.session()?;
        if self.navigation.pop().is_err() {
            return Ok(None);
        }
        Ok(self.navigation.peek().ok().copied())
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> MailStats {
        MailStats {
            users: self.accounts.len(),
            folders: self
                .mailboxes
                .iter()
                .map(|m| FolderStats {
                    folder: m.folder(),
                    count: m.len(),
                    unread: m.unread_count(),
                })
                .collect(),
            scheduled: self.scheduled.len(),
            incoming: self.incoming.len(),
            priority: self.priority.len(),
            can_undo: !self.undo_stack.is_empty(),
            can_redo: !self.redo_stack.is_empty(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &MailConfig {
        &self.config
    }

    /// The persistence collaborator.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the engine and returns its store. Unsaved session state is
    /// dropped; call [`logout`](Self::logout) first to keep it.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn session(&self) -> Result<String> {
        self.current.clone().ok_or(Error::NotAuthenticated)
    }

    fn current_account_mut(&mut self) -> Result<&mut Account> {
        let email = self.session()?;
        self.accounts
            .search_mut(&email)
            .map_err(|_| Error::AccountNotFound(email))
    }

    fn mailbox(&self, folder: Folder) -> &Mailbox {
        &self.mailboxes[folder.index()]
    }

    fn mailbox_mut(&mut self, folder: Folder) -> &mut Mailbox {
        &mut self.mailboxes[folder.index()]
    }

    fn allocate_message_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_message_id);
        self.next_message_id += 1;
        id
    }

    /// Fills the mailboxes from the store, re-classifying received mail.
    fn load_session(&mut self, email: &str) -> Result<()> {
        let snapshot = self.store.load_messages(email)?;
        if let Some(max) = snapshot.max_id() {
            self.next_message_id = self.next_message_id.max(max.0 + 1);
        }

        let mut reclassified = 0;
        for mut message in snapshot.into_messages() {
            let received = message.receiver == email && message.sender != email;
            let settled = matches!(message.folder, Folder::Spam | Folder::Trash);
            if received && !settled && self.classify(&message) {
                message.is_spam = true;
                message.folder = Folder::Spam;
                reclassified += 1;
            }
            self.mailbox_mut(message.folder).add(message);
        }

        let total: usize = self.mailboxes.iter().map(Mailbox::len).sum();
        debug!("Loaded {total} messages for {email}, {reclassified} moved to spam");
        Ok(())
    }

    fn persist_session(&mut self) -> Result<()> {
        let Some(email) = self.current.clone() else {
            return Ok(());
        };
        let snapshot = FolderSnapshot::from_messages(
            self.mailboxes
                .iter()
                .flat_map(|m| m.messages().iter().cloned()),
        );
        self.store.save_folders(&email, &snapshot)?;
        debug!("Saved {} messages for {email}", snapshot.len());
        Ok(())
    }

    fn persist_contacts(&mut self) -> Result<()> {
        let email = self.session()?;
        let contacts: Vec<_> = self
            .accounts
            .search(&email)
            .map_err(|_| Error::AccountNotFound(email.clone()))?
            .contacts()
            .values()
            .cloned()
            .collect();
        self.store.save_contacts(&email, &contacts)
    }
}

impl<S: MailStore + std::fmt::Debug> std::fmt::Debug for MailOrchestrator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailOrchestrator")
            .field("current", &self.current)
            .field("accounts", &self.accounts.len())
            .field("next_message_id", &self.next_message_id)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine() -> MailOrchestrator<MemoryStore> {
        MailOrchestrator::new(MemoryStore::new(), MailConfig::default()).unwrap()
    }

    #[test]
    fn test_create_account_validates() {
        let mut mail = engine();
        let err = mail.create_account("", "alice", "").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(mail.stats().users, 0);
    }

    #[test]
    fn test_account_ids_increase() {
        let mut mail = engine();
        assert!(mail.create_account("Alice", "alice@x", "p1").unwrap());
        assert!(mail.create_account("Bob", "bob@y", "p2").unwrap());
        assert_eq!(mail.account("alice@x").unwrap().id.to_string(), "U1");
        assert_eq!(mail.account("bob@y").unwrap().id.to_string(), "U2");
    }

    #[test]
    fn test_login_failures() {
        let mut mail = engine();
        mail.create_account("Alice", "alice@x", "p1").unwrap();
        assert!(!mail.login("nobody@x", "p1").unwrap());
        assert!(!mail.login("alice@x", "wrong").unwrap());
        assert!(!mail.is_authenticated());
        assert!(mail.login("alice@x", "p1").unwrap());
        assert_eq!(mail.current_account().unwrap().name, "Alice");
    }

    #[test]
    fn test_logout_requires_session() {
        let mut mail = engine();
        assert!(matches!(mail.logout(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn test_navigation_history() {
        let mut mail = engine();
        mail.create_account("Alice", "alice@x", "p1").unwrap();
        mail.login("alice@x", "p1").unwrap();
        mail.open_folder(Folder::Inbox).unwrap();
        mail.open_folder(Folder::Sent).unwrap();
        mail.open_folder(Folder::Trash).unwrap();
        assert_eq!(mail.navigate_back().unwrap(), Some(Folder::Sent));
        assert_eq!(mail.navigate_back().unwrap(), Some(Folder::Inbox));
        assert_eq!(mail.navigate_back().unwrap(), None);
        assert_eq!(mail.navigate_back().unwrap(), None);
    }

    #[test]
    fn test_activity_log_is_bounded() {
        let config = MailConfig {
            activity_log_capacity: 3,
            ..MailConfig::default()
        };
        let mut mail = MailOrchestrator::new(MemoryStore::new(), config).unwrap();
        for n in 0..5 {
            mail.log_activity(format!("event {n}"));
        }
        let log: Vec<&str> = mail.activity().map(|e| e.description.as_str()).collect();
        assert_eq!(log, ["event 2", "event 3", "event 4"]);
    }
}
