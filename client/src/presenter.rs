//! `Presenter` implementation that writes into a reactive view signal.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ChatApp` calls these methods synchronously from event handlers and
//! spawned tasks. Each call is a single `RwSignal::update`, so components
//! re-render from `ChatViewState` without knowing about the core.

use leptos::prelude::*;

use chatbot::transport::KnowledgeBaseStats;
use chatbot::{ConnectivityState, Message, Presenter, Severity};

use crate::state::chat_view::ChatViewState;

/// How long a toast stays on screen.
pub const NOTICE_TTL_MS: u64 = 5_000;

#[derive(Clone, Copy)]
pub struct SignalPresenter {
    view: RwSignal<ChatViewState>,
}

impl SignalPresenter {
    pub fn new(view: RwSignal<ChatViewState>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> RwSignal<ChatViewState> {
        self.view
    }
}

impl Presenter for SignalPresenter {
    fn render_message(&self, message: &Message) {
        self.view.update(|v| v.push_message(message));
    }

    fn set_connectivity(&self, state: ConnectivityState) {
        self.view.update(|v| v.connectivity = state);
    }

    fn set_typing(&self, typing: bool) {
        self.view.update(|v| v.typing = typing);
    }

    fn set_unread_badge(&self, count: u32) {
        self.view.update(|v| v.unread = count);
    }

    fn notify(&self, text: &str, severity: Severity) {
        let mut id = 0;
        self.view.update(|v| id = v.push_notice(text, severity));

        #[cfg(feature = "csr")]
        {
            let view = self.view;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(NOTICE_TTL_MS)).await;
                // The owning page may already be gone.
                let _ = view.try_update(|v| v.dismiss(id));
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = id;
    }

    fn reset_transcript(&self, welcome_text: &str) {
        self.view.update(|v| v.reset(welcome_text));
    }

    fn show_knowledge_base(&self, stats: &KnowledgeBaseStats) {
        let stats = *stats;
        self.view.update(|v| v.knowledge_base = Some(stats));
    }

    fn set_uploading(&self, uploading: bool) {
        self.view.update(|v| v.uploading = uploading);
    }

    fn set_panel_open(&self, open: bool) {
        self.view.update(|v| v.panel_open = open);
    }
}
