//! In-process store.

use std::collections::HashMap;

use super::{FolderSnapshot, MailStore};
use crate::Result;
use crate::account::Account;
use crate::contacts::Contact;
use crate::spam::DEFAULT_SPAM_WORDS;
use crate::trust::TrustEdge;

/// Store that keeps everything in memory. Contents vanish on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: HashMap<String, Account>,
    mail: HashMap<String, FolderSnapshot>,
    contacts: HashMap<String, Vec<Contact>>,
    edges: Vec<TrustEdge>,
    spam_words: Option<Vec<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with a custom spam word list.
    #[must_use]
    pub fn with_spam_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            spam_words: Some(words.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}

impl MailStore for MemoryStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.values().cloned().collect())
    }

    fn save_account(&mut self, account: &Account) -> Result<()> {
        self.accounts.insert(account.email.clone(), account.clone());
        Ok(())
    }

    fn save_all_accounts(&mut self, accounts: &[&Account]) -> Result<()> {
        self.accounts = accounts
            .iter()
            .map(|a| (a.email.clone(), (*a).clone()))
            .collect();
        Ok(())
    }

    fn load_messages(&self, email: &str) -> Result<FolderSnapshot> {
        Ok(self.mail.get(email).cloned().unwrap_or_default())
    }

    fn save_folders(&mut self, email: &str, folders: &FolderSnapshot) -> Result<()> {
        self.mail.insert(email.to_string(), folders.clone());
        Ok(())
    }

    fn load_trust_graph(&self) -> Result<Vec<TrustEdge>> {
        Ok(self.edges.clone())
    }

    fn save_trust_graph(&mut self, edges: &[TrustEdge]) -> Result<()> {
        self.edges = edges.to_vec();
        Ok(())
    }

    fn load_spam_words(&self) -> Result<Vec<String>> {
        Ok(self.spam_words.clone().unwrap_or_else(|| {
            DEFAULT_SPAM_WORDS.iter().map(ToString::to_string).collect()
        }))
    }

    fn load_contacts(&self, email: &str) -> Result<Vec<Contact>> {
        Ok(self.contacts.get(email).cloned().unwrap_or_default())
    }

    fn save_contacts(&mut self, email: &str, contacts: &[Contact]) -> Result<()> {
        self.contacts.insert(email.to_string(), contacts.to_vec());
        Ok(())
    }
}
