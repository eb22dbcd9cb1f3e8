//! Error types for the core library.

use thiserror::Error;

use crate::collections::CollectionError;
use crate::message::MessageId;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A container operation failed (missing key, empty container, full heap).
    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),

    /// A key that must be unique already exists.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A mailbox operation was attempted with no account logged in.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Malformed input from the presentation layer.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Message not found in the folder it was looked up in.
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// I/O error from a persistence backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
