//! Connection indicator and knowledge-base summary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both values come from `ChatViewState`, updated by the status poll. The
//! theme toggle saves through the core like any other settings change.

#[cfg(test)]
#[path = "status_bar_test.rs"]
mod status_bar_test;

use leptos::prelude::*;

use chatbot::transport::KnowledgeBaseStats;
use chatbot::{ConfigPatch, ConnectivityState};

use crate::app::use_chat;
use crate::util::theme;

#[component]
pub fn StatusBar(#[prop(optional)] on_settings: Option<Callback<()>>) -> impl IntoView {
    let chat = use_chat();
    let view = chat.view;
    let settings = chat.settings;

    let on_theme_toggle = move |_| {
        let next = theme::toggled(settings.get_untracked().theme);
        chat.save_settings(ConfigPatch { theme: Some(next), ..ConfigPatch::default() });
    };

    view! {
        <div class="status-bar">
            <div class="status-bar__section">
                <span class="status-bar__item">
                    <span class=move || connectivity_class(view.get().connectivity)></span>
                    {move || connectivity_label(view.get().connectivity)}
                </span>
                <span class="status-bar__divider"></span>
                <span class="status-bar__item">
                    {move || knowledge_base_summary(view.get().knowledge_base)}
                </span>
                <Show when=move || view.get().uploading>
                    <span class="status-bar__divider"></span>
                    <span class="status-bar__item">"Uploading..."</span>
                </Show>
            </div>
            <div class="status-bar__section">
                <button class="status-bar__button" on:click=on_theme_toggle title="Toggle theme">
                    {move || if settings.get().theme == chatbot::config::Theme::Dark { "☀" } else { "☾" }}
                </button>
                {on_settings.map(|on_settings| {
                    view! {
                        <button class="status-bar__button" on:click=move |_| on_settings.run(()) title="Settings">
                            "⚙"
                        </button>
                    }
                })}
            </div>
        </div>
    }
}

fn connectivity_class(state: ConnectivityState) -> &'static str {
    match state {
        ConnectivityState::Online => "status-bar__dot status-bar__dot--connected",
        ConnectivityState::Offline => "status-bar__dot status-bar__dot--disconnected",
    }
}

fn connectivity_label(state: ConnectivityState) -> &'static str {
    match state {
        ConnectivityState::Online => "Connected",
        ConnectivityState::Offline => "Disconnected",
    }
}

fn knowledge_base_summary(stats: Option<KnowledgeBaseStats>) -> String {
    match stats {
        Some(stats) => format!("{} documents | {} vectors", stats.total_documents, stats.vector_store_size),
        None => "Knowledge base: --".to_owned(),
    }
}
