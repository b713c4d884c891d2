//! Networking for the browser surfaces.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` adapts `fetch` to the core's `HttpBackend` seam; request
//! building and response normalization stay in the `chatbot` crate.

pub mod backend;
