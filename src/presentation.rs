//! Contract between the core and whatever renders it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The core pushes state into a [`Presenter`]; the UI layer sends user
//! actions back as [`Intent`]s through [`crate::app::ChatApp::dispatch`].
//! Neither side knows how the other is implemented (DOM signals, terminal
//! output, a recording mock in tests).

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;

use crate::config::ConfigPatch;
use crate::connectivity::ConnectivityState;
use crate::session::Message;
use crate::transport::KnowledgeBaseStats;
use crate::upload::Document;

/// Tone of a transient notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Rendering sink. Calls arrive on the UI thread, never re-entrantly.
pub trait Presenter {
    fn render_message(&self, message: &Message);
    fn set_connectivity(&self, state: ConnectivityState);
    fn set_typing(&self, typing: bool);
    fn set_unread_badge(&self, count: u32);
    fn notify(&self, text: &str, severity: Severity);

    /// Transcript was replaced; show only the welcome text.
    fn reset_transcript(&self, welcome_text: &str) {
        let _ = welcome_text;
    }

    fn show_knowledge_base(&self, stats: &KnowledgeBaseStats) {
        let _ = stats;
    }

    fn set_uploading(&self, uploading: bool) {
        let _ = uploading;
    }

    /// Widget panel visibility changed.
    fn set_panel_open(&self, open: bool) {
        let _ = open;
    }
}

impl<T: Presenter + ?Sized> Presenter for std::rc::Rc<T> {
    fn render_message(&self, message: &Message) {
        (**self).render_message(message);
    }
    fn set_connectivity(&self, state: ConnectivityState) {
        (**self).set_connectivity(state);
    }
    fn set_typing(&self, typing: bool) {
        (**self).set_typing(typing);
    }
    fn set_unread_badge(&self, count: u32) {
        (**self).set_unread_badge(count);
    }
    fn notify(&self, text: &str, severity: Severity) {
        (**self).notify(text, severity);
    }
    fn reset_transcript(&self, welcome_text: &str) {
        (**self).reset_transcript(welcome_text);
    }
    fn show_knowledge_base(&self, stats: &KnowledgeBaseStats) {
        (**self).show_knowledge_base(stats);
    }
    fn set_uploading(&self, uploading: bool) {
        (**self).set_uploading(uploading);
    }
    fn set_panel_open(&self, open: bool) {
        (**self).set_panel_open(open);
    }
}

/// User actions a UI layer can request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    SendMessage(String),
    ClearHistory,
    OpenPanel,
    ClosePanel,
    TogglePanel,
    SaveConfig(ConfigPatch),
    UploadDocument(Document),
    RefreshKnowledgeBase,
}

/// Input length indicator. Display only; never limits what is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCounter {
    pub count: usize,
    pub level: CounterLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Error,
}

impl CharCounter {
    pub const LIMIT: usize = 500;
    const WARNING_ABOVE: usize = 450;
    const ERROR_ABOVE: usize = 480;

    #[must_use]
    pub fn for_input(input: &str) -> Self {
        let count = input.chars().count();
        let level = if count > Self::ERROR_ABOVE {
            CounterLevel::Error
        } else if count > Self::WARNING_ABOVE {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        };
        Self { count, level }
    }

    /// `"123/500"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.count, Self::LIMIT)
    }
}
