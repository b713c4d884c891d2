//! Root application component, routing, and the shared chat context.
//!
//! DESIGN
//! ======
//! A chat surface owns one `Rc<BrowserChatApp>`. `Rc` is not `Send`, so it
//! is parked in a local `StoredValue` and handed out through the `Copy`
//! [`ChatContext`]. Event handlers capture the context at setup time and
//! spawn the core's async operations with `spawn_local`.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use chatbot::{ChatApp, Config, ConfigPatch, Intent, Surface};

use crate::net::backend::BrowserBackend;
use crate::pages::{admin::AdminPage, chat::ChatPage};
use crate::presenter::SignalPresenter;
use crate::state::chat_view::ChatViewState;
use crate::util::storage::BrowserStorage;

pub type BrowserChatApp = ChatApp<BrowserBackend, BrowserStorage, SignalPresenter>;

/// Handle to one chat surface, provided via context.
#[derive(Clone, Copy)]
pub struct ChatContext {
    app: StoredValue<Rc<BrowserChatApp>, LocalStorage>,
    pub view: RwSignal<ChatViewState>,
    /// Settings as last applied; drives theme and labels.
    pub settings: RwSignal<Config>,
}

/// Build the core app for `surface` together with its view signal.
pub fn build_chat_app(surface: Surface) -> (Rc<BrowserChatApp>, RwSignal<ChatViewState>) {
    let view = RwSignal::new(ChatViewState::default());
    let app = ChatApp::new(surface, BrowserBackend::new(), BrowserStorage, SignalPresenter::new(view));
    (Rc::new(app), view)
}

impl ChatContext {
    pub fn new(app: Rc<BrowserChatApp>, view: RwSignal<ChatViewState>) -> Self {
        let settings = RwSignal::new(app.config());
        Self { app: StoredValue::new_local(app), view, settings }
    }

    /// `None` once the owning view has been disposed.
    pub fn app(&self) -> Option<Rc<BrowserChatApp>> {
        self.app.try_get_value()
    }

    /// Run an intent on the core without blocking the caller.
    pub fn dispatch(&self, intent: Intent) {
        let Some(app) = self.app() else {
            return;
        };
        let settings = self.settings;
        let refresh_settings = matches!(intent, Intent::SaveConfig(_));
        leptos::task::spawn_local(async move {
            app.dispatch(intent).await;
            if refresh_settings {
                settings.set(app.config());
            }
        });
    }

    pub fn save_settings(&self, patch: ConfigPatch) {
        self.dispatch(Intent::SaveConfig(patch));
    }

    /// Render initial state, then poll status and follow browser
    /// online/offline events until the surrounding owner is cleaned up.
    pub fn launch(&self) {
        let ctx = *self;
        Effect::new(move || crate::util::theme::apply(ctx.settings.get().theme));

        #[cfg(feature = "csr")]
        {
            use std::sync::Arc;
            use std::sync::atomic::{AtomicBool, Ordering};

            let Some(app) = self.app() else {
                return;
            };
            let poll_alive = Arc::new(AtomicBool::new(true));
            let poll_alive_task = poll_alive.clone();
            leptos::task::spawn_local(async move {
                app.start().await;
                app.run_status_poll(move |interval| {
                    let alive = poll_alive_task.clone();
                    async move {
                        gloo_timers::future::sleep(interval).await;
                        if !alive.load(Ordering::Relaxed) {
                            std::future::pending::<()>().await;
                        }
                    }
                })
                .await;
            });

            let online = window_event_listener(leptos::ev::online, move |_| {
                if let Some(app) = ctx.app() {
                    leptos::task::spawn_local(async move {
                        app.back_online().await;
                    });
                }
            });
            let offline = window_event_listener(leptos::ev::offline, move |_| {
                if let Some(app) = ctx.app() {
                    app.went_offline();
                }
            });
            on_cleanup(move || {
                poll_alive.store(false, Ordering::Relaxed);
                online.remove();
                offline.remove();
            });
        }
    }
}

pub fn use_chat() -> ChatContext {
    expect_context::<ChatContext>()
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="AI Assistant"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=ChatPage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
            </Routes>
        </Router>
    }
}
