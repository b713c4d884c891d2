//! Line-oriented [`Presenter`] for the terminal.
//!
//! Interactive sessions print every state change. One-shot commands print
//! only assistant replies and error notifications so the output can be piped.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::cell::RefCell;
use std::io::Write;

use chatbot::transport::KnowledgeBaseStats;
use chatbot::{ConnectivityState, Message, Presenter, Severity};

pub struct TerminalPresenter<W> {
    out: RefCell<W>,
    interactive: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self { out: RefCell::new(out), interactive }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        // Write errors (closed pipe) are ignored.
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_message(&self, message: &Message) {
        // The user's own line is already on screen.
        if !message.is_assistant() {
            return;
        }
        if self.interactive {
            self.line(&format!("[{}] assistant: {}", message.time_label(), message.text));
        } else {
            self.line(&message.text);
        }
    }

    fn set_connectivity(&self, state: ConnectivityState) {
        if self.interactive {
            self.line(&format!("-- {}", connectivity_label(state)));
        }
    }

    fn set_typing(&self, typing: bool) {
        if self.interactive && typing {
            self.line("-- assistant is typing...");
        }
    }

    fn set_unread_badge(&self, _count: u32) {}

    fn notify(&self, text: &str, severity: Severity) {
        if self.interactive || severity == Severity::Error {
            self.line(&format!("[{}] {text}", severity.as_str()));
        }
    }

    fn reset_transcript(&self, welcome_text: &str) {
        if self.interactive {
            self.line(&format!("assistant: {welcome_text}"));
        }
    }

    fn show_knowledge_base(&self, stats: &KnowledgeBaseStats) {
        if self.interactive {
            self.line(&format!(
                "-- knowledge base: {} documents, {} vectors",
                stats.total_documents, stats.vector_store_size
            ));
        }
    }

    fn set_uploading(&self, uploading: bool) {
        if self.interactive && uploading {
            self.line("-- uploading...");
        }
    }
}

fn connectivity_label(state: ConnectivityState) -> &'static str {
    match state {
        ConnectivityState::Online => "connected",
        ConnectivityState::Offline => "disconnected (sending disabled)",
    }
}
