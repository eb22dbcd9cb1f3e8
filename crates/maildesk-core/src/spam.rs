//! Keyword spam filter.

use crate::message::MailMessage;

/// Word list used when the persistence layer has none stored.
pub const DEFAULT_SPAM_WORDS: [&str; 10] = [
    "Winner",
    "Free",
    "Urgent",
    "Claim",
    "Bonus",
    "Limited",
    "Exclusive",
    "Gift",
    "Guaranteed",
    "Profit",
];

/// Case-insensitive substring matcher over subject and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpamFilter {
    words: Vec<String>,
}

impl SpamFilter {
    /// Builds a filter from a word list. Blank entries are ignored.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The normalized (lowercase) word list.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns true if the subject or body contains any configured word.
    #[must_use]
    pub fn is_spam(&self, message: &MailMessage) -> bool {
        self.matching_word(message).is_some()
    }

    /// The first configured word found in the subject or body.
    #[must_use]
    pub fn matching_word(&self, message: &MailMessage) -> Option<&str> {
        let subject = message.subject.to_lowercase();
        let body = message.body.to_lowercase();
        self.words
            .iter()
            .find(|w| subject.contains(w.as_str()) || body.contains(w.as_str()))
            .map(String::as_str)
    }
}

impl Default for SpamFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SPAM_WORDS)
    }
}
