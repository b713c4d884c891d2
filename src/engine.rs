//! The send-message state machine.
//!
//! DESIGN
//! ======
//! The engine performs no I/O. A send is split in two halves:
//! [`ConversationEngine::begin_send`] validates, appends the user message and
//! hands back a [`PendingReply`] ticket; the caller performs the request and
//! feeds the result to [`ConversationEngine::complete_send`]. The ticket
//! remembers which session it belongs to, so a reply that arrives after the
//! history was cleared is recognized and dropped.
//!
//! ```text
//!           begin_send ok
//!   Idle ─────────────────▶ AwaitingReply
//!    ▲                          │
//!    └──── complete_send ───────┘   (reply or fallback appended)
//!    └──── clear_history ───────┘   (reply discarded on arrival)
//! ```

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::error::ClientError;
use crate::session::{Message, Session};

/// Assistant text appended when a chat request fails.
pub const FALLBACK_REPLY: &str = "Sorry, an error occurred while processing your message.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    AwaitingReply,
}

/// Why a send was not dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SendRejected {
    /// Blank after trimming. Callers ignore this silently.
    #[error("message is empty")]
    Empty,
    /// A reply is still outstanding for this session.
    #[error("waiting for the previous reply")]
    Busy,
    #[error("Not connected to the server. Please check your connection.")]
    NotConnected,
}

/// Ticket for one dispatched chat request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub session_id: String,
    /// Trimmed text to put on the wire.
    pub text: String,
    /// The user message as appended to the transcript.
    pub message: Message,
}

/// What [`ConversationEngine::complete_send`] did with a reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    Appended(Message),
    Fallback { message: Message, error: ClientError },
    /// The reply belonged to a session that has since been cleared.
    Discarded,
}

#[derive(Debug)]
pub struct ConversationEngine {
    session: Session,
    /// Session id of the request in flight, if any.
    in_flight: Option<String>,
    panel_open: bool,
    unread: u32,
}

impl ConversationEngine {
    #[must_use]
    pub fn new(panel_open: bool) -> Self {
        Self { session: Session::new(), in_flight: None, panel_open, unread: 0 }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        self.session.id()
    }

    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        self.session.transcript()
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.in_flight.is_some() { EngineState::AwaitingReply } else { EngineState::Idle }
    }

    /// True exactly while a request is in flight for the current session.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn unread(&self) -> u32 {
        self.unread
    }

    /// Start a send. On success the user message is already in the
    /// transcript and the engine is `AwaitingReply`.
    ///
    /// # Errors
    ///
    /// Rejections are checked in order: [`SendRejected::Busy`],
    /// [`SendRejected::Empty`], [`SendRejected::NotConnected`]. A rejected
    /// send changes nothing.
    pub fn begin_send(&mut self, text: &str, online: bool) -> Result<PendingReply, SendRejected> {
        if self.in_flight.is_some() {
            return Err(SendRejected::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(SendRejected::Empty);
        }
        if !online {
            return Err(SendRejected::NotConnected);
        }
        let message = Message::user(text);
        self.session.append(message.clone());
        let session_id = self.session.id().to_owned();
        self.in_flight = Some(session_id.clone());
        Ok(PendingReply { session_id, text: text.to_owned(), message })
    }

    /// Resolve a ticket with the transport result.
    pub fn complete_send(&mut self, pending: PendingReply, result: Result<String, ClientError>) -> ReplyOutcome {
        if pending.session_id != self.session.id() {
            return ReplyOutcome::Discarded;
        }
        self.in_flight = None;
        match result {
            Ok(text) => ReplyOutcome::Appended(self.append_assistant(Message::assistant(text))),
            Err(error) => {
                let message = self.append_assistant(Message::assistant(FALLBACK_REPLY));
                ReplyOutcome::Fallback { message, error }
            }
        }
    }

    /// Append an assistant message that did not come from a chat request.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> Message {
        self.append_assistant(Message::assistant(text))
    }

    /// Replace the session. Any reply still in flight will be discarded.
    pub fn clear_history(&mut self) -> &Session {
        self.session = Session::new();
        self.in_flight = None;
        self.unread = 0;
        &self.session
    }

    /// Returns whether the panel state changed.
    pub fn open_panel(&mut self) -> bool {
        self.unread = 0;
        !std::mem::replace(&mut self.panel_open, true)
    }

    /// Returns whether the panel state changed.
    pub fn close_panel(&mut self) -> bool {
        std::mem::replace(&mut self.panel_open, false)
    }

    fn append_assistant(&mut self, message: Message) -> Message {
        self.session.append(message.clone());
        if !self.panel_open {
            self.unread = self.unread.saturating_add(1);
        }
        message
    }
}
