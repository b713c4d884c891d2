//! # chatbot
//!
//! Platform-neutral core of the assistant chat client: session identity,
//! settings persistence, the HTTP transport contract, connectivity tracking,
//! the conversation state machine, and the widget event bus.
//!
//! The browser (`client/`) and terminal (`cli/`) front ends plug into the
//! seams defined here: [`transport::HttpBackend`] moves bytes,
//! [`store::KvStore`] persists settings, and [`presentation::Presenter`]
//! renders state. [`app::ChatApp`] wires one of each into a single context
//! object owned by the host.
//!
//! CONCURRENCY
//! ===========
//! Everything runs on one logical thread. Futures returned by this crate are
//! `!Send`; suspension only happens at network boundaries.

pub mod admin;
pub mod app;
pub mod config;
pub mod connectivity;
pub mod engine;
pub mod error;
pub mod events;
pub mod presentation;
pub mod session;
pub mod store;
pub mod transport;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{ChatApp, Surface};
pub use config::{Config, ConfigPatch, ConfigStore};
pub use connectivity::ConnectivityState;
pub use engine::{ConversationEngine, EngineState, ReplyOutcome, SendRejected};
pub use error::{ClientError, ValidationError};
pub use events::{EventBus, WidgetEvent};
pub use presentation::{Intent, Presenter, Severity};
pub use session::{Message, Sender, Session};
pub use transport::{HttpBackend, TransportClient};
