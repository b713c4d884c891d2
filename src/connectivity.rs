//! Connected/disconnected belief about the assistant service.
//!
//! DESIGN
//! ======
//! The monitor only records outcomes and reports edges; issuing the status
//! request, scheduling the poll, and reacting to edges belong to
//! [`crate::app::ChatApp`]. Keeping the state machine free of I/O lets the
//! poll loop, browser signals, and settings saves share it without locks.

#[cfg(test)]
#[path = "connectivity_test.rs"]
mod connectivity_test;

use std::cell::Cell;
use std::time::Duration;

/// Interval between scheduled status checks.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectivityState {
    Online,
    /// Initial state until the first status check succeeds.
    #[default]
    Offline,
}

impl ConnectivityState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// Result of recording a new observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    WentOnline,
    WentOffline,
}

#[derive(Debug, Default)]
pub struct ConnectivityMonitor {
    state: Cell<ConnectivityState>,
}

impl ConnectivityMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ConnectivityState {
        self.state.get()
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.state() == ConnectivityState::Online
    }

    /// Record the outcome of a status check.
    pub fn record(&self, next: ConnectivityState) -> Transition {
        let previous = self.state.replace(next);
        match (previous, next) {
            (ConnectivityState::Offline, ConnectivityState::Online) => Transition::WentOnline,
            (ConnectivityState::Online, ConnectivityState::Offline) => Transition::WentOffline,
            _ => Transition::Unchanged,
        }
    }

    /// Browser reported loss of network; no poll is needed to believe it.
    pub fn force_offline(&self) -> Transition {
        self.record(ConnectivityState::Offline)
    }
}
