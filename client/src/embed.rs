//! JavaScript embedding API for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! A host page loads the WASM bundle and drives the widget through
//! `ChatWidget`:
//!
//! ```js
//! const widget = new ChatWidget();
//! widget.on("message_received", (e) => console.log(e.message));
//! widget.init({ apiUrl: "https://bot.example/api", position: "bottom-left" });
//! ```
//!
//! The widget keeps its own `Rc<BrowserChatApp>` so the methods below work
//! outside the reactive tree.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use chatbot::{ConfigPatch, Surface};

use crate::app::{BrowserChatApp, ChatContext, build_chat_app};
use crate::components::widget::Widget;
use crate::state::chat_view::ChatViewState;

const MOUNT_ID: &str = "chatbot-widget-root";

#[wasm_bindgen]
pub struct ChatWidget {
    owner: Owner,
    app: Rc<BrowserChatApp>,
    view: RwSignal<ChatViewState>,
    mounted: bool,
}

#[wasm_bindgen]
impl ChatWidget {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let owner = Owner::new();
        let (app, view) = owner.with(|| build_chat_app(Surface::Widget));
        Self { owner, app, view, mounted: false }
    }

    /// Subscribe to a widget event. The callback receives the payload object.
    ///
    /// # Errors
    ///
    /// Rejects unknown event names.
    pub fn on(&self, event: &str, callback: js_sys::Function) -> Result<(), JsValue> {
        self.app
            .on(event, move |payload| {
                let arg = js_sys::JSON::parse(&payload.to_string()).map_err(|e| format!("{e:?}"))?;
                callback.call1(&JsValue::NULL, &arg).map(|_| ()).map_err(|e| format!("{e:?}"))
            })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply host options for this page and mount the widget. Calling it
    /// again only re-applies options.
    ///
    /// # Errors
    ///
    /// Fails when `options` is not a JSON-compatible object or the page has
    /// no `<body>`.
    pub fn init(&mut self, options: JsValue) -> Result<(), JsValue> {
        let patch = parse_options(&options)?;
        self.app.apply_overrides(&patch);
        if self.mounted {
            return Ok(());
        }

        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body().map(|b| (d, b)))
            .ok_or_else(|| JsValue::from_str("document body unavailable"))?;
        let (document, body) = body;
        let root = document.create_element("div")?;
        root.set_id(MOUNT_ID);
        body.append_child(&root)?;
        let root: web_sys::HtmlElement = root.dyn_into()?;

        let app = self.app.clone();
        let view = self.view;
        leptos::mount::mount_to(root, move || {
            let chat = ChatContext::new(app, view);
            provide_context(chat);
            chat.launch();
            view! { <Widget/> }
        })
        .forget();
        self.mounted = true;
        leptos::logging::log!("chat widget mounted");
        Ok(())
    }

    pub fn open(&self) {
        self.app.open_panel();
    }

    pub fn close(&self) {
        self.app.close_panel();
    }

    pub fn toggle(&self) {
        self.app.toggle_panel();
    }

    /// Append an assistant message from the host.
    #[wasm_bindgen(js_name = sendBotMessage)]
    pub fn send_bot_message(&self, text: &str) {
        self.app.push_assistant_message(text);
    }

    /// Send a user message as if typed.
    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, text: String) {
        let app = self.app.clone();
        leptos::task::spawn_local(async move {
            let _ = app.send_message(&text).await;
        });
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&self) {
        self.app.clear_history();
    }

    #[wasm_bindgen(js_name = sessionId)]
    pub fn session_id(&self) -> String {
        self.app.session_id()
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        if !self.mounted {
            self.owner.cleanup();
        }
    }
}

fn parse_options(options: &JsValue) -> Result<ConfigPatch, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ConfigPatch::default());
    }
    let raw: String = js_sys::JSON::stringify(options)?.into();
    serde_json::from_str(&raw).map_err(|e| JsValue::from_str(&format!("invalid widget options: {e}")))
}
