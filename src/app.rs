//! Application context: one per chat surface, owned by the host.
//!
//! DESIGN
//! ======
//! [`ChatApp`] wires the settings store, transport, connectivity monitor,
//! conversation engine, presenter, and (widget only) event bus together.
//! Hosts create it once, wrap it in an `Rc`, and hand clones to whatever
//! needs it: UI callbacks, the poll loop, the embedding API.
//!
//! All methods take `&self`. The engine lives in a `RefCell`; every borrow is
//! released before the next `.await` and before calling into the presenter
//! or event handlers, so a status check may run while a chat reply is still
//! pending without either blocking the other.
//!
//! ERROR HANDLING
//! ==============
//! Every failure becomes state or a notification here. Methods still return
//! the underlying result so non-interactive hosts (the CLI's one-shot
//! commands, tests) can act on it.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::config::{Config, ConfigPatch, ConfigStore};
use crate::connectivity::{ConnectivityMonitor, ConnectivityState, STATUS_POLL_INTERVAL, Transition};
use crate::engine::{ConversationEngine, EngineState, ReplyOutcome, SendRejected};
use crate::error::ClientError;
use crate::events::{EventBus, UnknownEvent, WidgetEvent};
use crate::presentation::{Intent, Presenter, Severity};
use crate::session::Message;
use crate::store::{KvStore, StoreError};
use crate::transport::{HttpBackend, KnowledgeBaseStats, TransportClient, UploadAck};
use crate::upload::Document;

pub const CONNECTION_LOST: &str = "Connection to the server lost";
pub const CONNECTION_RESTORED: &str = "Connection restored";
pub const HISTORY_CLEARED: &str = "Chat cleared";
pub const SETTINGS_SAVED: &str = "Settings saved";

/// Which chat surface a [`ChatApp`] drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    /// Standalone chat screen: always open, no host events.
    Screen,
    /// Embeddable widget: starts closed, emits host events.
    Widget,
}

pub struct ChatApp<B, S, P> {
    surface: Surface,
    config: ConfigStore<S>,
    transport: TransportClient<B>,
    connectivity: ConnectivityMonitor,
    engine: RefCell<ConversationEngine>,
    presenter: P,
    events: EventBus,
    uploading: Cell<bool>,
}

impl<B, S, P> ChatApp<B, S, P>
where
    B: HttpBackend,
    S: KvStore,
    P: Presenter,
{
    /// Load settings from `store` and build the context. Nothing is rendered
    /// or requested until [`ChatApp::start`].
    pub fn new(surface: Surface, backend: B, store: S, presenter: P) -> Self {
        let config = ConfigStore::load(store);
        let transport = TransportClient::new(backend, config.handle());
        Self {
            surface,
            config,
            transport,
            connectivity: ConnectivityMonitor::new(),
            engine: RefCell::new(ConversationEngine::new(surface == Surface::Screen)),
            presenter,
            events: EventBus::new(),
            uploading: Cell::new(false),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn config(&self) -> Config {
        self.config.current()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn transport(&self) -> &TransportClient<B> {
        &self.transport
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn session_id(&self) -> String {
        self.engine.borrow().session_id().to_owned()
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.engine.borrow().transcript().to_vec()
    }

    pub fn engine_state(&self) -> EngineState {
        self.engine.borrow().state()
    }

    pub fn unread(&self) -> u32 {
        self.engine.borrow().unread()
    }

    pub fn panel_open(&self) -> bool {
        self.engine.borrow().panel_open()
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.connectivity.state()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.get()
    }

    /// Subscribe the embedding host to a widget event by name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEvent`] for unrecognized names.
    pub fn on(&self, name: &str, handler: impl Fn(&Value) -> Result<(), String> + 'static) -> Result<(), UnknownEvent> {
        self.events.on_named(name, handler)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Render the initial state, announce the widget, and run the first
    /// status check.
    pub async fn start(&self) {
        let config = self.config();
        let panel_open = self.panel_open();
        self.presenter.reset_transcript(&config.welcome_text);
        self.presenter.set_connectivity(self.connectivity.state());
        self.presenter.set_typing(false);
        self.presenter.set_unread_badge(0);
        self.presenter.set_panel_open(panel_open);
        tracing::info!(surface = ?self.surface, api_base = %config.api_base, session_id = %self.session_id(), "chat started");
        self.emit(WidgetEvent::Loaded, &Value::Object(serde_json::Map::new()));
        self.check_status().await;
    }

    /// Check status every [`STATUS_POLL_INTERVAL`] forever. The host
    /// supplies the timer (`gloo-timers` in the browser, `tokio` natively).
    pub async fn run_status_poll<F, Fut>(&self, sleep: F)
    where
        F: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        loop {
            sleep(STATUS_POLL_INTERVAL).await;
            self.check_status().await;
        }
    }

    // =========================================================================
    // CONVERSATION
    // =========================================================================

    /// Send `text` and wait for the reply.
    ///
    /// # Errors
    ///
    /// Returns the [`SendRejected`] reason when nothing was dispatched. Only
    /// [`SendRejected::NotConnected`] is shown to the user; the others are
    /// silent no-ops. Remote failures are not errors here: they end in the
    /// fallback message.
    pub async fn send_message(&self, text: &str) -> Result<(), SendRejected> {
        let online = self.connectivity.is_online();
        let begun = self.engine.borrow_mut().begin_send(text, online);
        let pending = match begun {
            Ok(pending) => pending,
            Err(rejected) => {
                if rejected == SendRejected::NotConnected {
                    self.presenter.notify(&rejected.to_string(), Severity::Error);
                }
                tracing::debug!(reason = ?rejected, "send rejected");
                return Err(rejected);
            }
        };

        self.presenter.render_message(&pending.message);
        self.presenter.set_typing(true);
        self.emit(WidgetEvent::MessageSent, &serde_json::json!({ "message": pending.text }));

        let result = self.transport.send_chat_message(&pending.text, &pending.session_id).await;
        let outcome = self.engine.borrow_mut().complete_send(pending, result);

        match outcome {
            ReplyOutcome::Appended(message) => {
                self.presenter.set_typing(false);
                self.show_assistant(&message);
                self.emit(WidgetEvent::MessageReceived, &serde_json::json!({ "message": message.text }));
            }
            ReplyOutcome::Fallback { message, error } => {
                self.presenter.set_typing(false);
                self.show_assistant(&message);
                self.presenter.notify(&error.to_string(), Severity::Error);
            }
            ReplyOutcome::Discarded => {
                tracing::debug!("reply for a cleared session discarded");
            }
        }
        Ok(())
    }

    /// Start a new session. A reply still in flight will be dropped.
    pub fn clear_history(&self) {
        let welcome_text = self.config.current().welcome_text;
        let session_id = self.engine.borrow_mut().clear_history().id().to_owned();
        self.presenter.reset_transcript(&welcome_text);
        self.presenter.set_typing(false);
        self.presenter.set_unread_badge(0);
        self.presenter.notify(HISTORY_CLEARED, Severity::Info);
        tracing::info!(%session_id, "history cleared");
    }

    /// Append a host-supplied assistant message.
    pub fn push_assistant_message(&self, text: &str) {
        let message = self.engine.borrow_mut().push_assistant(text);
        self.show_assistant(&message);
    }

    pub fn open_panel(&self) {
        let changed = self.engine.borrow_mut().open_panel();
        if changed {
            self.presenter.set_panel_open(true);
            self.presenter.set_unread_badge(0);
            self.emit(WidgetEvent::Opened, &Value::Object(serde_json::Map::new()));
        }
    }

    pub fn close_panel(&self) {
        let changed = self.engine.borrow_mut().close_panel();
        if changed {
            self.presenter.set_panel_open(false);
            self.emit(WidgetEvent::Closed, &Value::Object(serde_json::Map::new()));
        }
    }

    pub fn toggle_panel(&self) {
        if self.panel_open() {
            self.close_panel();
        } else {
            self.open_panel();
        }
    }

    fn show_assistant(&self, message: &Message) {
        self.presenter.render_message(message);
        let (open, unread) = {
            let engine = self.engine.borrow();
            (engine.panel_open(), engine.unread())
        };
        if !open {
            self.presenter.set_unread_badge(unread);
        }
    }

    fn emit(&self, event: WidgetEvent, payload: &Value) {
        if self.surface == Surface::Widget {
            self.events.emit(event, payload);
        }
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Merge and persist settings, then re-check connectivity against the
    /// (possibly new) API base.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] when persisting failed. The new settings are
    /// in effect either way.
    pub async fn save_config(&self, patch: ConfigPatch) -> Result<Config, StoreError> {
        let result = self.config.save(&patch);
        match &result {
            Ok(_) => self.presenter.notify(SETTINGS_SAVED, Severity::Success),
            Err(e) => {
                tracing::warn!(error = %e, "settings not persisted");
                self.presenter.notify(&format!("Settings applied but not saved: {e}"), Severity::Warning);
            }
        }
        self.check_status().await;
        result
    }

    /// Merge host-supplied options for this page only.
    pub fn apply_overrides(&self, patch: &ConfigPatch) -> Config {
        self.config.apply(patch)
    }

    // =========================================================================
    // CONNECTIVITY
    // =========================================================================

    /// Issue one status request and update the connectivity belief.
    pub async fn check_status(&self) -> ConnectivityState {
        self.probe(false).await
    }

    /// Browser reported the network is gone.
    pub fn went_offline(&self) {
        if self.connectivity.force_offline() == Transition::WentOffline {
            self.announce_offline();
        }
    }

    /// Browser reported the network is back; re-check immediately.
    pub async fn back_online(&self) -> ConnectivityState {
        self.probe(true).await
    }

    async fn probe(&self, announce_restore: bool) -> ConnectivityState {
        let (next, reported) = match self.transport.get_status().await {
            Ok(report) => (ConnectivityState::Online, report.knowledge_base()),
            Err(e) => {
                tracing::debug!(error = %e, "status check failed");
                (ConnectivityState::Offline, None)
            }
        };
        if let Some(stats) = &reported {
            self.presenter.show_knowledge_base(stats);
        }
        match self.connectivity.record(next) {
            Transition::WentOnline => {
                tracing::info!("connected");
                self.presenter.set_connectivity(ConnectivityState::Online);
                if announce_restore {
                    self.presenter.notify(CONNECTION_RESTORED, Severity::Success);
                }
                // Reports without counts fall back to the dedicated endpoint.
                if reported.is_none() {
                    self.refresh_knowledge_base().await;
                }
            }
            Transition::WentOffline => self.announce_offline(),
            Transition::Unchanged => {}
        }
        next
    }

    fn announce_offline(&self) {
        tracing::warn!("connection lost");
        self.presenter.set_connectivity(ConnectivityState::Offline);
        self.presenter.notify(CONNECTION_LOST, Severity::Warning);
    }

    // =========================================================================
    // KNOWLEDGE BASE
    // =========================================================================

    /// Fetch and show knowledge-base statistics. Failures are only logged.
    pub async fn refresh_knowledge_base(&self) -> Option<KnowledgeBaseStats> {
        match self.transport.get_knowledge_base_stats().await {
            Ok(stats) => {
                self.presenter.show_knowledge_base(&stats);
                Some(stats)
            }
            Err(e) => {
                tracing::warn!(error = %e, "knowledge base stats unavailable");
                None
            }
        }
    }

    /// Validate and upload a document, then refresh statistics.
    ///
    /// # Errors
    ///
    /// Validation, transport, or remote failure; each is also shown as an
    /// error notification.
    pub async fn upload_document(&self, document: Document) -> Result<UploadAck, ClientError> {
        if let Err(e) = document.validate() {
            self.presenter.notify(&e.to_string(), Severity::Error);
            return Err(e.into());
        }
        let file_name = document.file_name.clone();
        self.uploading.set(true);
        self.presenter.set_uploading(true);
        let result = self.transport.upload_document(document).await;
        self.uploading.set(false);
        self.presenter.set_uploading(false);

        match &result {
            Ok(_) => {
                tracing::info!(%file_name, "document uploaded");
                self.presenter
                    .notify(&format!("Document \"{file_name}\" uploaded successfully"), Severity::Success);
                self.refresh_knowledge_base().await;
            }
            Err(e) => {
                self.presenter.notify(&format!("Upload failed: {e}"), Severity::Error);
            }
        }
        result
    }

    // =========================================================================
    // INTENTS
    // =========================================================================

    /// Route a UI intent to its operation. Outcomes are already surfaced
    /// through the presenter.
    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::SendMessage(text) => {
                let _ = self.send_message(&text).await;
            }
            Intent::ClearHistory => self.clear_history(),
            Intent::OpenPanel => self.open_panel(),
            Intent::ClosePanel => self.close_panel(),
            Intent::TogglePanel => self.toggle_panel(),
            Intent::SaveConfig(patch) => {
                let _ = self.save_config(patch).await;
            }
            Intent::UploadDocument(document) => {
                let _ = self.upload_document(document).await;
            }
            Intent::RefreshKnowledgeBase => {
                self.refresh_knowledge_base().await;
            }
        }
    }
}
