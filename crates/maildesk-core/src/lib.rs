//! # maildesk-core
//!
//! Core engine for the `maildesk` local mail system.
//!
//! This crate provides:
//! - Account registration and sign-in
//! - Six-folder mailboxes with priority and recency views
//! - Keyword and trust-graph spam classification
//! - Scheduled, incoming and high-importance message queues
//! - Undo/redo of folder moves and recovery of deleted mail
//! - Contact books and social trust connections
//! - Persistence through the [`MailStore`] trait (in-memory and JSON stores)
//!
//! The containers behind all of this live in [`collections`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod activity;
pub mod collections;
mod config;
pub mod contacts;
mod error;
pub mod mailbox;
pub mod message;
pub mod orchestrator;
mod spam;
pub mod store;
pub mod trust;

pub use account::{Account, AccountId, ValidationError, ValidationResult, validate_registration};
pub use activity::ActivityEntry;
pub use collections::CollectionError;
pub use config::MailConfig;
pub use contacts::Contact;
pub use error::{Error, Result};
pub use mailbox::Mailbox;
pub use message::{Folder, MailMessage, MessageId, Priority};
pub use orchestrator::{
    ComposeRequest, FolderStats, MailOrchestrator, MailStats, SendMode, DEFAULT_TIMESTAMP_LIMIT,
};
pub use spam::{DEFAULT_SPAM_WORDS, SpamFilter};
pub use store::{FolderSnapshot, JsonStore, MailStore, MemoryStore};
pub use trust::{TrustEdge, TrustGraph};
