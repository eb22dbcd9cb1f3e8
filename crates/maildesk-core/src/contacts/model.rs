//! Contact model for the address book.

use serde::{Deserialize, Serialize};

use crate::collections::IndexedStore;

/// Address book keyed by contact email.
pub type ContactBook = IndexedStore<String, Contact>;

/// A contact owned by exactly one account's address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address (unique within an address book).
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Number of messages sent to this contact.
    #[serde(default)]
    pub interactions: u32,
}

impl Contact {
    /// Creates a new contact with no recorded interactions.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
            interactions: 0,
        }
    }

    /// Sets the phone number; blank input clears it.
    #[must_use]
    pub fn with_phone(mut self, phone: Option<&str>) -> Self {
        self.phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string);
        self
    }

    /// Records one more interaction.
    pub const fn record_interaction(&mut self) {
        self.interactions = self.interactions.saturating_add(1);
    }

    /// Returns a display string for the contact.
    ///
    /// If a name is present, returns "Name <email>", otherwise just "email".
    #[must_use]
    pub fn display(&self) -> String {
        if self.name.is_empty() {
            self.email.clone()
        } else {
            format!("{} <{}>", self.name, self.email)
        }
    }

    /// Checks if the contact matches a search query (case-insensitive).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        self.email.to_lowercase().contains(&query_lower)
            || self.name.to_lowercase().contains(&query_lower)
    }
}
