//! Persistence contract and the stores that implement it.
//!
//! The orchestrator never touches the filesystem directly; everything it
//! loads or saves goes through a [`MailStore`]. Two implementations ship with
//! the crate:
//!
//! - [`MemoryStore`] keeps everything in process memory and is used by tests.
//! - [`JsonStore`] keeps one JSON file per concern under a root directory.

mod json;
mod memory;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::account::Account;
use crate::contacts::Contact;
use crate::message::{Folder, MailMessage, MessageId};
use crate::trust::TrustEdge;

pub use json::JsonStore;
pub use memory::MemoryStore;

/// Storage backend for accounts, mail, contacts and the trust graph.
pub trait MailStore {
    /// Loads every registered account.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load_accounts(&self) -> Result<Vec<Account>>;

    /// Inserts or replaces one account, keyed by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the account cannot be written.
    fn save_account(&mut self, account: &Account) -> Result<()>;

    /// Replaces the whole account directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the accounts cannot be written.
    fn save_all_accounts(&mut self, accounts: &[&Account]) -> Result<()>;

    /// Loads the stored folders for one account. Unknown accounts have an
    /// empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored folders cannot be read.
    fn load_messages(&self, email: &str) -> Result<FolderSnapshot>;

    /// Replaces the stored folders for one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the folders cannot be written.
    fn save_folders(&mut self, email: &str, folders: &FolderSnapshot) -> Result<()>;

    /// Loads every trust edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be read.
    fn load_trust_graph(&self) -> Result<Vec<TrustEdge>>;

    /// Replaces the stored trust edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be written.
    fn save_trust_graph(&mut self, edges: &[TrustEdge]) -> Result<()>;

    /// Loads the spam word list, or the built-in list if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored list exists but cannot be read.
    fn load_spam_words(&self) -> Result<Vec<String>>;

    /// Loads one account's address book.
    ///
    /// # Errors
    ///
    /// Returns an error if the contacts cannot be read.
    fn load_contacts(&self, email: &str) -> Result<Vec<Contact>>;

    /// Replaces one account's address book.
    ///
    /// # Errors
    ///
    /// Returns an error if the contacts cannot be written.
    fn save_contacts(&mut self, email: &str, contacts: &[Contact]) -> Result<()>;
}

/// The six folders of one account, as stored.
///
/// Serialized as a map from folder name to message list. Folders with no
/// messages may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderSnapshot {
    folders: BTreeMap<Folder, Vec<MailMessage>>,
}

impl FolderSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            folders: BTreeMap::new(),
        }
    }

    /// Builds a snapshot, filing each message under its folder tag.
    #[must_use]
    pub fn from_messages(messages: impl IntoIterator<Item = MailMessage>) -> Self {
        let mut snapshot = Self::new();
        for message in messages {
            snapshot.push(message);
        }
        snapshot
    }

    /// Files a message under its folder tag.
    pub fn push(&mut self, message: MailMessage) {
        self.folders.entry(message.folder).or_default().push(message);
    }

    /// Messages stored for `folder`.
    #[must_use]
    pub fn folder(&self, folder: Folder) -> &[MailMessage] {
        self.folders.get(&folder).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of messages across all folders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.folders.values().map(Vec::len).sum()
    }

    /// Returns true if no folder holds a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest message identifier in the snapshot.
    #[must_use]
    pub fn max_id(&self) -> Option<MessageId> {
        self.folders.values().flatten().map(|m| m.id).max()
    }

    /// Consumes the snapshot, yielding messages folder by folder.
    ///
    /// A message stored under a folder key is re-tagged with that folder.
    pub fn into_messages(self) -> impl Iterator<Item = MailMessage> {
        self.folders
            .into_iter()
            .flat_map(|(folder, messages)| messages.into_iter().map(move |m| m.with_folder(folder)))
    }
}
