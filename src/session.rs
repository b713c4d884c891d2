//! Session identity and the append-only transcript.
//!
//! DESIGN
//! ======
//! A [`Session`] is replaced wholesale on history clear rather than mutated
//! back to empty, so any reply still in flight for the old id can be
//! recognized and dropped on arrival.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use time::OffsetDateTime;
use uuid::Uuid;

/// Generate a new session token.
///
/// UUIDv7: a millisecond timestamp (monotonic within this process) followed
/// by random bits, so ids from concurrent clients do not collide and sort by
/// creation time.
#[must_use]
pub fn new_session_id() -> String {
    Uuid::now_v7().hyphenated().to_string()
}

/// Who authored a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single transcript entry. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub sent_at: OffsetDateTime,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Assistant)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self { text: text.into(), sender, sent_at: OffsetDateTime::now_utc() }
    }

    #[must_use]
    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }

    /// `HH:MM` (UTC) label used next to rendered messages.
    #[must_use]
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.sent_at.hour(), self.sent_at.minute())
    }
}

/// One client-visible conversation.
#[derive(Clone, Debug)]
pub struct Session {
    id: String,
    created_at: OffsetDateTime,
    transcript: Vec<Message>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self { id: new_session_id(), created_at: OffsetDateTime::now_utc(), transcript: Vec::new() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub(crate) fn append(&mut self, message: Message) {
        self.transcript.push(message);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
