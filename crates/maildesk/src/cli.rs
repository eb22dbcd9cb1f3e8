//! Command-line definition.

use clap::{Parser, Subcommand};
use maildesk_core::{DEFAULT_TIMESTAMP_LIMIT, Folder, MessageId};

/// Local mailbox engine.
#[derive(Debug, Parser)]
#[command(name = "maildesk", version, about = "Local mailbox engine")]
pub struct Cli {
    /// Account email to sign in with
    #[arg(long, env = "MAILDESK_USER", global = true)]
    pub user: Option<String>,

    /// Account secret
    #[arg(long, env = "MAILDESK_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// One invocation's command.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        /// Display name
        name: String,
        /// Email address
        email: String,
        /// Login secret
        #[arg(value_name = "SECRET")]
        password: String,
    },
    /// Send a message now
    Send {
        /// Recipient address
        to: String,
        /// Subject line
        subject: String,
        /// Message body
        body: String,
        /// Priority 0-5
        #[arg(default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        priority: u8,
    },
    /// Save a draft
    Draft {
        /// Subject line
        subject: String,
        /// Message body
        body: String,
        /// Recipient address
        #[arg(default_value = "")]
        to: String,
    },
    /// List a folder
    List {
        /// Folder name
        #[arg(default_value = "inbox", value_parser = parse_folder)]
        folder: Folder,
    },
    /// List a folder by priority
    Priority {
        /// Folder name
        #[arg(default_value = "inbox", value_parser = parse_folder)]
        folder: Folder,
    },
    /// Newest Inbox messages
    Recent {
        /// Number of messages
        #[arg(default_value_t = DEFAULT_TIMESTAMP_LIMIT)]
        limit: usize,
    },
    /// Mark a message read and show it
    Read {
        /// Message id, e.g. E1001
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
    },
    /// Move a message to Trash
    Delete {
        /// Message id, e.g. E1001
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
        /// Folder holding the message
        #[arg(value_parser = parse_folder)]
        folder: Folder,
    },
    /// Move a message to Important
    Important {
        /// Message id, e.g. E1001
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
    },
    /// Move a message to Spam
    Spam {
        /// Message id, e.g. E1001
        #[arg(value_parser = parse_message_id)]
        id: MessageId,
    },
    /// Search sender and subject
    Search {
        /// Text to look for
        query: String,
    },
    /// Permanently delete Trash
    EmptyTrash,
    /// List contacts
    Contacts,
    /// Search contacts by name or email
    FindContact {
        /// Text to look for
        query: String,
    },
    /// Add a contact
    AddContact {
        /// Contact name
        name: String,
        /// Contact email
        email: String,
        /// Phone number
        phone: Option<String>,
    },
    /// Add a trust connection
    Connect {
        /// Peer address
        email: String,
    },
    /// List mutual connections
    Mutuals {
        /// Peer address
        email: String,
    },
    /// Spam score for a sender
    Trust {
        /// Sender address
        email: String,
    },
    /// Folder and queue counters
    Stats,
    /// Show configuration
    Config {
        /// Setting name; all settings when omitted
        key: Option<String>,
    },
}

impl Command {
    /// Whether the command needs a signed-in account.
    pub const fn needs_session(&self) -> bool {
        !matches!(self, Self::Register { .. } | Self::Config { .. })
    }
}

fn parse_folder(s: &str) -> Result<Folder, String> {
    Folder::parse(s).ok_or_else(|| format!("unknown folder `{s}`"))
}

fn parse_message_id(s: &str) -> Result<MessageId, String> {
    MessageId::parse(s).ok_or_else(|| format!("invalid message id `{s}`"))
}
