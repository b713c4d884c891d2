//! Transcript, typing indicator, and message input.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared by the full-screen page and the widget panel. Reads everything from
//! `ChatViewState`; a submit becomes `Intent::SendMessage` and the core
//! decides whether it is dispatched.

#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod chat_panel_test;

use leptos::prelude::*;

use chatbot::presentation::{CharCounter, CounterLevel};
use chatbot::Intent;

use crate::app::use_chat;

#[component]
pub fn ChatPanel(#[prop(optional)] on_close: Option<Callback<()>>) -> impl IntoView {
    let chat = use_chat();
    let view = chat.view;
    let settings = chat.settings;

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let state = view.get();
        let _ = state.lines.len();
        let _ = state.typing;

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let do_send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        // Cleared only when the send can go out; a rejected send keeps the draft.
        if view.get_untracked().can_send() {
            input.set(String::new());
        }
        chat.dispatch(Intent::SendMessage(text));
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let counter = move || CharCounter::for_input(&input.get());
    let placeholder = move || input_placeholder(view.get().is_online(), &settings.get().placeholder_text);

    view! {
        <div class="chat-panel">
            <header class="chat-panel__header">
                <span class="chat-panel__title">{move || settings.get().title}</span>
                <span class="chat-panel__spacer"></span>
                <button
                    class="btn chat-panel__clear"
                    title="Clear chat"
                    on:click=move |_| chat.dispatch(Intent::ClearHistory)
                >
                    "Clear"
                </button>
                {on_close.map(|on_close| {
                    view! {
                        <button
                            class="btn chat-panel__close"
                            title="Close"
                            aria-label="Close chat"
                            on:click=move |_| on_close.run(())
                        >
                            "✕"
                        </button>
                    }
                })}
            </header>

            <div class="chat-panel__messages" node_ref=messages_ref>
                <For
                    each=move || view.get().lines
                    key=|line| line.id
                    children=move |line| {
                        view! {
                            <div
                                class="chat-panel__message"
                                class:chat-panel__message--user=line.from_user
                                class:chat-panel__message--bot=!line.from_user
                                class:chat-panel__message--welcome=line.welcome
                            >
                                <span class="chat-panel__text">{line.text}</span>
                                <span class="chat-panel__time">{line.time_label}</span>
                            </div>
                        }
                    }
                />
                <Show when=move || view.get().typing>
                    <div class="chat-panel__typing" aria-label="Assistant is typing">
                        <span></span>
                        <span></span>
                        <span></span>
                    </div>
                </Show>
            </div>

            <div class="chat-panel__input-row">
                <textarea
                    class="chat-panel__input"
                    rows="1"
                    placeholder=placeholder
                    disabled=move || !view.get().is_online()
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                <button
                    class="btn btn--primary chat-panel__send"
                    on:click=move |_| do_send()
                    disabled=move || !view.get().can_send() || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
            <div class=move || counter_class(counter().level)>{move || counter().label()}</div>
        </div>
    }
}

fn counter_class(level: CounterLevel) -> &'static str {
    match level {
        CounterLevel::Normal => "chat-panel__counter",
        CounterLevel::Warning => "chat-panel__counter chat-panel__counter--warning",
        CounterLevel::Error => "chat-panel__counter chat-panel__counter--error",
    }
}

fn input_placeholder(online: bool, placeholder: &str) -> String {
    if online { placeholder.to_owned() } else { "Waiting for connection...".to_owned() }
}
