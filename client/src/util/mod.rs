//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, document attributes)
//! from page and component logic.

pub mod storage;
pub mod theme;
