//! Widget lifecycle notifications for the embedding host.
//!
//! ERROR HANDLING
//! ==============
//! Handlers are host code. A handler that returns `Err` or panics is logged
//! and skipped; the remaining handlers still run and nothing propagates back
//! into the conversation engine.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use std::str::FromStr;

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetEvent {
    Loaded,
    Opened,
    Closed,
    MessageSent,
    MessageReceived,
}

impl WidgetEvent {
    pub const ALL: [Self; 5] = [Self::Loaded, Self::Opened, Self::Closed, Self::MessageSent, Self::MessageReceived];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loaded => "widget_loaded",
            Self::Opened => "widget_opened",
            Self::Closed => "widget_closed",
            Self::MessageSent => "message_sent",
            Self::MessageReceived => "message_received",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown widget event `{0}`")]
pub struct UnknownEvent(pub String);

impl FromStr for WidgetEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownEvent(s.to_owned()))
    }
}

pub type Handler = Rc<dyn Fn(&Value) -> Result<(), String>>;

/// Synchronous, in-order fan-out of widget events.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<(WidgetEvent, Handler)>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`. Duplicate registrations all fire.
    pub fn on(&self, event: WidgetEvent, handler: impl Fn(&Value) -> Result<(), String> + 'static) {
        self.handlers.borrow_mut().push((event, Rc::new(handler)));
    }

    /// Register by wire name, as the host's script API does.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEvent`] for names outside [`WidgetEvent::ALL`].
    pub fn on_named(
        &self,
        name: &str,
        handler: impl Fn(&Value) -> Result<(), String> + 'static,
    ) -> Result<(), UnknownEvent> {
        self.on(name.parse()?, handler);
        Ok(())
    }

    /// Invoke every handler for `event` in registration order. Returns how
    /// many handlers completed successfully.
    pub fn emit(&self, event: WidgetEvent, payload: &Value) -> usize {
        // Snapshot so handlers may register more handlers mid-emit.
        let handlers: Vec<Handler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(registered, _)| *registered == event)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        let mut delivered = 0;
        for handler in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => tracing::warn!(event = event.as_str(), error = %e, "event handler failed"),
                Err(_) => tracing::warn!(event = event.as_str(), "event handler panicked"),
            }
        }
        tracing::debug!(event = event.as_str(), delivered, "event emitted");
        delivered
    }

    #[must_use]
    pub fn handler_count(&self, event: WidgetEvent) -> usize {
        self.handlers.borrow().iter().filter(|(registered, _)| *registered == event).count()
    }
}
