//! Account model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collections::BoundedLog;
use crate::contacts::{Contact, ContactBook};

/// Number of recently contacted addresses an account remembers by default.
pub const DEFAULT_RECENT_CONTACTS: usize = 10;

/// Unique identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Create a new account ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U{}", self.0)
    }
}

fn default_recent_contacts() -> BoundedLog<String> {
    BoundedLog::new(DEFAULT_RECENT_CONTACTS)
}

/// A registered mailbox owner, keyed by email address.
///
/// The contact book and recent-contact list are persisted separately from
/// the account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Email address (unique key).
    pub email: String,
    /// Login secret, compared in plaintext.
    pub secret: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
    /// Most recent successful login.
    pub last_login: DateTime<Utc>,
    #[serde(skip)]
    contacts: ContactBook,
    #[serde(skip, default = "default_recent_contacts")]
    recent_contacts: BoundedLog<String>,
}

impl Account {
    /// Creates an account stamped with the current time.
    #[must_use]
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            email: email.into(),
            secret: secret.into(),
            created_at: now,
            last_login: now,
            contacts: ContactBook::new(),
            recent_contacts: default_recent_contacts(),
        }
    }

    /// Replaces the recent-contact list with an empty one of `capacity`.
    #[must_use]
    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.recent_contacts = BoundedLog::new(capacity);
        self
    }

    /// Checks a login secret.
    #[must_use]
    pub fn verify_secret(&self, secret: &str) -> bool {
        self.secret == secret
    }

    /// Stamps the last-login time with the current time.
    pub fn touch_login(&mut self) {
        self.last_login = Utc::now();
    }

    /// The address book.
    #[must_use]
    pub const fn contacts(&self) -> &ContactBook {
        &self.contacts
    }

    /// Adds or replaces a contact, keyed by its email.
    pub fn add_contact(&mut self, contact: Contact) -> Option<Contact> {
        self.contacts.insert(contact.email.clone(), contact)
    }

    /// Looks up a contact by email.
    #[must_use]
    pub fn find_contact(&self, email: &str) -> Option<&Contact> {
        self.contacts.search(&email.to_string()).ok()
    }

    /// Removes a contact by email.
    pub fn remove_contact(&mut self, email: &str) -> Option<Contact> {
        self.contacts.remove(&email.to_string()).ok()
    }

    /// Replaces the whole address book.
    pub fn set_contacts(&mut self, contacts: impl IntoIterator<Item = Contact>) {
        self.contacts = contacts.into_iter().map(|c| (c.email.clone(), c)).collect();
    }

    /// Records `address` as recently contacted and bumps the matching
    /// contact's interaction counter, if any.
    pub fn record_contacted(&mut self, address: &str) {
        self.recent_contacts.push(address.to_string());
        if let Ok(contact) = self.contacts.search_mut(&address.to_string()) {
            contact.record_interaction();
        }
    }

    /// Recently contacted addresses, oldest first.
    pub fn recent_contacts(&self) -> impl DoubleEndedIterator<Item = &String> {
        self.recent_contacts.iter()
    }
}
