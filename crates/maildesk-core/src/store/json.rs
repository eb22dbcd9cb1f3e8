//! JSON file store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{FolderSnapshot, MailStore};
use crate::Result;
use crate::account::Account;
use crate::contacts::Contact;
use crate::spam::DEFAULT_SPAM_WORDS;
use crate::trust::TrustEdge;

const ACCOUNTS_FILE: &str = "accounts.json";
const TRUST_GRAPH_FILE: &str = "trust_graph.json";
const SPAM_WORDS_FILE: &str = "spam_words.json";
const MAIL_DIR: &str = "mail";
const CONTACTS_DIR: &str = "contacts";

/// Store that keeps each concern in its own JSON file under a root directory.
///
/// ```text
/// <root>/accounts.json
/// <root>/trust_graph.json
/// <root>/spam_words.json
/// <root>/mail/<email>.json
/// <root>/contacts/<email>.json
/// ```
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(MAIL_DIR))?;
        fs::create_dir_all(root.join(CONTACTS_DIR))?;
        debug!("Opened JSON store at {}", root.display());
        Ok(Self { root })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn mail_path(&self, email: &str) -> PathBuf {
        self.root.join(MAIL_DIR).join(file_name(email))
    }

    fn contacts_path(&self, email: &str) -> PathBuf {
        self.root.join(CONTACTS_DIR).join(file_name(email))
    }
}

/// Maps an address to a file name that stays inside its directory.
fn file_name(email: &str) -> String {
    let safe: String = email
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{safe}.json")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        warn!("Ignoring empty file {}", path.display());
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&contents)?))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

impl MailStore for JsonStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        Ok(read_json(&self.root.join(ACCOUNTS_FILE))?.unwrap_or_default())
    }

    fn save_account(&mut self, account: &Account) -> Result<()> {
        let mut accounts = self.load_accounts()?;
        match accounts.iter_mut().find(|a| a.email == account.email) {
            Some(existing) => *existing = account.clone(),
            None => accounts.push(account.clone()),
        }
        write_json(&self.root.join(ACCOUNTS_FILE), &accounts)
    }

    fn save_all_accounts(&mut self, accounts: &[&Account]) -> Result<()> {
        write_json(&self.root.join(ACCOUNTS_FILE), accounts)
    }

    fn load_messages(&self, email: &str) -> Result<FolderSnapshot> {
        Ok(read_json(&self.mail_path(email))?.unwrap_or_default())
    }

    fn save_folders(&mut self, email: &str, folders: &FolderSnapshot) -> Result<()> {
        write_json(&self.mail_path(email), folders)
    }

    fn load_trust_graph(&self) -> Result<Vec<TrustEdge>> {
        Ok(read_json(&self.root.join(TRUST_GRAPH_FILE))?.unwrap_or_default())
    }

    fn save_trust_graph(&mut self, edges: &[TrustEdge]) -> Result<()> {
        write_json(&self.root.join(TRUST_GRAPH_FILE), edges)
    }

    fn load_spam_words(&self) -> Result<Vec<String>> {
        let stored: Option<Vec<String>> = read_json(&self.root.join(SPAM_WORDS_FILE))?;
        Ok(stored.unwrap_or_else(|| {
            debug!("No spam word list stored, using defaults");
            DEFAULT_SPAM_WORDS.iter().map(ToString::to_string).collect()
        }))
    }

    fn load_contacts(&self, email: &str) -> Result<Vec<Contact>> {
        Ok(read_json(&self.contacts_path(email))?.unwrap_or_default())
    }

    fn save_contacts(&mut self, email: &str, contacts: &[Contact]) -> Result<()> {
        write_json(&self.contacts_path(email), contacts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::Error;
    use crate::account::AccountId;
    use crate::message::{Folder, MailMessage, MessageId, Priority};

    fn open() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_layout() {
        let (dir, store) = open();
        assert_eq!(store.root(), dir.path());
        assert!(dir.path().join("mail").is_dir());
        assert!(dir.path().join("contacts").is_dir());
    }

    #[test]
    fn test_empty_store_reads_defaults() {
        let (_dir, store) = open();
        assert!(store.load_accounts().unwrap().is_empty());
        assert!(store.load_trust_graph().unwrap().is_empty());
        assert!(store.load_messages("alice@x").unwrap().is_empty());
        assert!(store.load_contacts("alice@x").unwrap().is_empty());
        assert_eq!(store.load_spam_words().unwrap()[0], "Winner");
    }

    #[test]
    fn test_accounts_upsert() {
        let (_dir, mut store) = open();
        let alice = Account::new(AccountId::new(1), "Alice", "alice@x", "p1");
        let bob = Account::new(AccountId::new(2), "Bob", "bob@y", "p2");
        store.save_account(&alice).unwrap();
        store.save_account(&bob).unwrap();
        store.save_account(&alice).unwrap();

        let accounts = store.load_accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].email, "alice@x");
        assert_eq!(accounts[1].id, AccountId::new(2));
        assert_eq!(accounts[0].created_at, alice.created_at);
    }

    #[test]
    fn test_folders_preserve_every_field() {
        let (_dir, mut store) = open();
        let mut message = MailMessage::new(MessageId::new(1042), "a@x", "b@y", "Report", "Body")
            .with_priority(Priority::new(4).unwrap())
            .with_folder(Folder::Important)
            .with_timestamp(Utc::now() - Duration::hours(3));
        message.is_read = true;
        message.is_spam = true;

        store
            .save_folders("b@y", &FolderSnapshot::from_messages([message.clone()]))
            .unwrap();
        let loaded = store.load_messages("b@y").unwrap();
        assert_eq!(loaded.folder(Folder::Important), [message]);
    }

    #[test]
    fn test_trust_graph_round_trip() {
        let (_dir, mut store) = open();
        let edges = vec![TrustEdge::new("a@x", "b@y", 3)];
        store.save_trust_graph(&edges).unwrap();
        assert_eq!(store.load_trust_graph().unwrap(), edges);
    }

    #[test]
    fn test_contacts_round_trip() {
        let (_dir, mut store) = open();
        let contacts = vec![Contact::new("C1", "Bob", "bob@y").with_phone(Some("555"))];
        store.save_contacts("alice@x", &contacts).unwrap();
        assert_eq!(store.load_contacts("alice@x").unwrap(), contacts);
        assert!(store.load_contacts("bob@y").unwrap().is_empty());
    }

    #[test]
    fn test_custom_spam_words() {
        let (dir, store) = open();
        fs::write(dir.path().join(SPAM_WORDS_FILE), r#"["lottery"]"#).unwrap();
        assert_eq!(store.load_spam_words().unwrap(), ["lottery"]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (dir, store) = open();
        fs::write(dir.path().join(ACCOUNTS_FILE), "{not json").unwrap();
        assert!(matches!(store.load_accounts(), Err(Error::Serde(_))));
    }

    #[test]
    fn test_file_name_stays_in_directory() {
        assert_eq!(file_name("a/b@x"), "a_b@x.json");
    }
}
