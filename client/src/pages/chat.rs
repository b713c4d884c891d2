//! Full-screen chat page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route. Builds the `Screen` surface, provides it to children, and
//! starts the status poll for the lifetime of the page.

use leptos::prelude::*;

use chatbot::Surface;

use crate::app::{ChatContext, build_chat_app};
use crate::components::chat_panel::ChatPanel;
use crate::components::notifications::Notifications;
use crate::components::settings_modal::SettingsModal;
use crate::components::status_bar::StatusBar;
use crate::components::upload_area::UploadArea;

#[component]
pub fn ChatPage() -> impl IntoView {
    let (app, view) = build_chat_app(Surface::Screen);
    let chat = ChatContext::new(app, view);
    provide_context(chat);
    chat.launch();

    let show_settings = RwSignal::new(false);
    let on_settings = Callback::new(move |()| show_settings.set(true));
    let on_settings_close = Callback::new(move |()| show_settings.set(false));

    view! {
        <div class="chat-page">
            <main class="chat-page__main">
                <ChatPanel/>
            </main>
            <aside class="chat-page__side">
                <UploadArea/>
                <a class="chat-page__admin-link" href="/admin">"Manage projects"</a>
            </aside>
            <StatusBar on_settings=on_settings/>
            <Show when=move || show_settings.get()>
                <SettingsModal on_close=on_settings_close/>
            </Show>
            <Notifications/>
        </div>
    }
}
