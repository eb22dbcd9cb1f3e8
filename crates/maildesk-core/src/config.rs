//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tunables for the mailbox engine.
///
/// Every field has a default, so a partial (or empty) JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    /// Number of entries kept in the activity log.
    #[serde(default = "default_activity_log_capacity")]
    pub activity_log_capacity: usize,
    /// Size of each folder's "recent" stack.
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
    /// Number of recently contacted addresses remembered per account.
    #[serde(default = "default_recent_contacts_capacity")]
    pub recent_contacts_capacity: usize,
    /// Capacity of the high-importance queue.
    #[serde(default = "default_heap_capacity")]
    pub heap_capacity: usize,
    /// Incoming messages at or above this priority join the high-importance queue.
    #[serde(default = "default_high_priority_threshold")]
    pub high_priority_threshold: u8,
    /// Trust score (0-100) at which delivered mail is routed to Spam.
    /// Unset means the trust score never decides routing.
    #[serde(default)]
    pub trust_spam_threshold: Option<u8>,
    /// Whether keyword spam filtering is applied.
    #[serde(default = "default_true")]
    pub spam_filter_enabled: bool,
    /// Advisory inbox size limit reported to the presentation layer.
    #[serde(default = "default_max_inbox_size")]
    pub max_inbox_size: usize,
    /// Advisory auto-save interval in seconds.
    #[serde(default = "default_auto_save_interval")]
    pub auto_save_interval_secs: u64,
    /// Whether the trash is emptied automatically.
    #[serde(default)]
    pub auto_delete_trash: bool,
    /// Whether the presentation layer shows notifications.
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    /// Presentation theme name.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Presentation font size.
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    /// Presentation language.
    #[serde(default = "default_language")]
    pub language: String,
}

const fn default_activity_log_capacity() -> usize {
    20
}

const fn default_recent_capacity() -> usize {
    10
}

const fn default_recent_contacts_capacity() -> usize {
    10
}

const fn default_heap_capacity() -> usize {
    100
}

const fn default_high_priority_threshold() -> u8 {
    3
}

const fn default_true() -> bool {
    true
}

const fn default_max_inbox_size() -> usize {
    1000
}

const fn default_auto_save_interval() -> u64 {
    300
}

fn default_theme() -> String {
    "Dark".to_string()
}

const fn default_font_size() -> u16 {
    14
}

fn default_language() -> String {
    "English".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            activity_log_capacity: default_activity_log_capacity(),
            recent_capacity: default_recent_capacity(),
            recent_contacts_capacity: default_recent_contacts_capacity(),
            heap_capacity: default_heap_capacity(),
            high_priority_threshold: default_high_priority_threshold(),
            trust_spam_threshold: None,
            spam_filter_enabled: default_true(),
            max_inbox_size: default_max_inbox_size(),
            auto_save_interval_secs: default_auto_save_interval(),
            auto_delete_trash: false,
            notifications_enabled: default_true(),
            theme: default_theme(),
            font_size: default_font_size(),
            language: default_language(),
        }
    }
}

impl MailConfig {
    /// Load configuration from a JSON file, falling back to defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is malformed.
    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Look up a setting by name, formatted for display.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        let value = match key {
            "activity_log_capacity" => self.activity_log_capacity.to_string(),
            "recent_capacity" => self.recent_capacity.to_string(),
            "recent_contacts_capacity" => self.recent_contacts_capacity.to_string(),
            "heap_capacity" => self.heap_capacity.to_string(),
            "high_priority_threshold" => self.high_priority_threshold.to_string(),
            "trust_spam_threshold" => self
                .trust_spam_threshold
                .map_or_else(|| "off".to_string(), |t| t.to_string()),
            "spam_filter_enabled" => self.spam_filter_enabled.to_string(),
            "max_inbox_size" => self.max_inbox_size.to_string(),
            "auto_save_interval_secs" => self.auto_save_interval_secs.to_string(),
            "auto_delete_trash" => self.auto_delete_trash.to_string(),
            "notifications_enabled" => self.notifications_enabled.to_string(),
            "theme" => self.theme.clone(),
            "font_size" => self.font_size.to_string(),
            "language" => self.language.clone(),
            _ => return None,
        };
        Some(value)
    }
}
