//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read `ChatViewState` and settings from the `ChatContext`
//! provider and send user actions back to the core as intents.

pub mod chat_panel;
pub mod notifications;
pub mod project_card;
pub mod settings_modal;
pub mod status_bar;
pub mod upload_area;
pub mod widget;
