//! Render state for a chat surface (screen or widget).
//!
//! DESIGN
//! ======
//! This is a projection written only by `SignalPresenter`. Components read
//! it through an `RwSignal` and never mutate it directly; user actions go to
//! `ChatApp` as intents and come back here as presenter calls.

#[cfg(test)]
#[path = "chat_view_test.rs"]
mod chat_view_test;

use chatbot::transport::KnowledgeBaseStats;
use chatbot::{ConnectivityState, Message, Severity};

/// One rendered transcript row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLine {
    /// Unique within the view's lifetime; used as the list key.
    pub id: u64,
    pub text: String,
    pub from_user: bool,
    pub time_label: String,
    /// Welcome text shown before the first user message.
    pub welcome: bool,
}

/// Transient toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatViewState {
    pub lines: Vec<ChatLine>,
    pub connectivity: ConnectivityState,
    pub typing: bool,
    pub unread: u32,
    pub panel_open: bool,
    pub uploading: bool,
    pub knowledge_base: Option<KnowledgeBaseStats>,
    pub notices: Vec<Notice>,
    next_notice_id: u64,
    next_line_id: u64,
}

impl ChatViewState {
    pub fn reset(&mut self, welcome_text: &str) {
        let id = self.line_id();
        self.lines = vec![ChatLine {
            id,
            text: welcome_text.to_owned(),
            from_user: false,
            time_label: String::new(),
            welcome: true,
        }];
        self.typing = false;
    }

    /// Append a message; the welcome row goes away once the user speaks.
    pub fn push_message(&mut self, message: &Message) {
        if !message.is_assistant() {
            self.lines.retain(|line| !line.welcome);
        }
        let id = self.line_id();
        self.lines.push(ChatLine {
            id,
            text: message.text.clone(),
            from_user: !message.is_assistant(),
            time_label: message.time_label(),
            welcome: false,
        });
    }

    fn line_id(&mut self) -> u64 {
        self.next_line_id += 1;
        self.next_line_id
    }

    /// Add a toast and return its id for later dismissal.
    pub fn push_notice(&mut self, text: &str, severity: Severity) -> u64 {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notices.push(Notice { id, text: text.to_owned(), severity });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    pub fn is_online(&self) -> bool {
        self.connectivity == ConnectivityState::Online
    }

    /// Input stays enabled only while a send could be dispatched.
    pub fn can_send(&self) -> bool {
        self.is_online() && !self.typing
    }

    /// Badge text; hidden at zero.
    pub fn badge_label(&self) -> Option<String> {
        match self.unread {
            0 => None,
            1..=9 => Some(self.unread.to_string()),
            _ => Some("9+".to_owned()),
        }
    }
}
