//! Address book and trust connections of the signed-in account.

use chrono::Utc;
use tracing::info;

use super::MailOrchestrator;
use crate::account::is_valid_email;
use crate::contacts::Contact;
use crate::store::MailStore;
use crate::{Error, Result};

impl<S: MailStore> MailOrchestrator<S> {
    /// Adds a contact, replacing any existing contact with the same email.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in,
    /// [`Error::InvalidInput`] for an empty name or malformed email, or a
    /// store error if the address book cannot be saved.
    pub fn add_contact(&mut self, name: &str, email: &str, phone: Option<&str>) -> Result<()> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("contact name is required".to_string()));
        }
        if !is_valid_email(email) {
            return Err(Error::InvalidInput(format!("invalid contact email: {email}")));
        }

        let id = format!("C{}", Utc::now().timestamp_millis());
        let contact = Contact::new(id, name, email).with_phone(phone);
        self.current_account_mut()?.add_contact(contact);
        self.log_activity(format!("Added contact: {name}"));
        self.persist_contacts()
    }

    /// Removes a contact by email. Returns false if there was none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or a store
    /// error if the address book cannot be saved.
    pub fn remove_contact(&mut self, email: &str) -> Result<bool> {
        let removed = self.current_account_mut()?.remove_contact(email.trim());
        let Some(contact) = removed else {
            return Ok(false);
        };
        self.log_activity(format!("Removed contact: {}", contact.name));
        self.persist_contacts()?;
        Ok(true)
    }

    /// The signed-in account's contacts, sorted by email.
    #[must_use]
    pub fn contacts(&self) -> Vec<&Contact> {
        self.current_account()
            .map(|a| a.contacts().values().collect())
            .unwrap_or_default()
    }

    /// Contacts whose name or email contains `query`, ignoring case.
    #[must_use]
    pub fn find_contacts(&self, query: &str) -> Vec<&Contact> {
        let query = query.trim();
        self.contacts()
            .into_iter()
            .filter(|c| c.matches(query))
            .collect()
    }

    /// Addresses the signed-in account mailed most recently, newest first.
    #[must_use]
    pub fn recent_contacts(&self) -> Vec<&str> {
        self.current_account()
            .map(|a| a.recent_contacts().rev().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Connects the signed-in account to `peer` in the trust graph.
    ///
    /// Connecting to an existing peer strengthens the link by one. Returns
    /// false if `peer` is not registered or is the signed-in account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if nobody is signed in, or a store
    /// error if the graph cannot be saved.
    pub fn connect(&mut self, peer: &str) -> Result<bool> {
        let me = self.session()?;
        let peer = peer.trim();
        let strength = self.graph.connection_strength(&me, peer) + 1;
        if !self.graph.add_connection(&me, peer, strength) {
            return Ok(false);
        }
        self.store.save_trust_graph(&self.graph.edges())?;
        info!("Connected {me} and {peer} (strength {strength})");
        self.log_activity(format!("Connected with {peer}"));
        Ok(true)
    }

    /// Accounts connected to both the signed-in account and `peer`.
    #[must_use]
    pub fn mutual_connections(&self, peer: &str) -> Vec<String> {
        self.current
            .as_ref()
            .map(|me| self.graph.mutual_connections(me, peer.trim()))
            .unwrap_or_default()
    }
}
