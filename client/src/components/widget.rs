//! Embeddable widget: floating launcher with unread badge and a chat panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted by `embed::ChatWidget` into a host page. Docking corner, theme,
//! and color overrides come from the effective settings, which may include
//! options the host passed to `init`.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use leptos::prelude::*;

use chatbot::config::Position;
use chatbot::Intent;

use crate::app::use_chat;
use crate::components::chat_panel::ChatPanel;
use crate::components::notifications::Notifications;
use crate::util::theme::style_variables;

#[component]
pub fn Widget() -> impl IntoView {
    let chat = use_chat();
    let view = chat.view;
    let settings = chat.settings;

    let on_close = Callback::new(move |()| chat.dispatch(Intent::ClosePanel));

    view! {
        <div
            class=move || root_class(settings.get().position)
            data-theme=move || settings.get().theme.as_str()
            style=move || style_variables(&settings.get().custom_styles)
        >
            <Show when=move || view.get().panel_open>
                <div class="chatbot-widget__panel">
                    <ChatPanel on_close=on_close/>
                </div>
            </Show>
            <button
                class="chatbot-widget__launcher"
                aria-label=move || launcher_label(view.get().panel_open)
                on:click=move |_| chat.dispatch(Intent::TogglePanel)
            >
                {move || if view.get().panel_open { "✕" } else { "💬" }}
                {move || {
                    view.get()
                        .badge_label()
                        .map(|label| view! { <span class="chatbot-widget__badge">{label}</span> })
                }}
            </button>
            <Notifications/>
        </div>
    }
}

fn root_class(position: Position) -> String {
    format!("chatbot-widget chatbot-widget--{}", position.as_str())
}

fn launcher_label(open: bool) -> &'static str {
    if open { "Close chat" } else { "Open chat" }
}
