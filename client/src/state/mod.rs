//! Reactive view state.
//!
//! DESIGN
//! ======
//! Plain structs wrapped in `RwSignal`s and provided via context. Domain
//! state (session, transcript, connectivity) lives in the `chatbot` core;
//! these are its rendered projections.

pub mod chat_view;
