//! Settings dialog: API base, result count, theme, and widget position.

#[cfg(test)]
#[path = "settings_modal_test.rs"]
mod settings_modal_test;

use leptos::prelude::*;

use chatbot::config::{Position, Theme};
use chatbot::ConfigPatch;

use crate::app::use_chat;

#[component]
pub fn SettingsModal(on_close: Callback<()>) -> impl IntoView {
    let chat = use_chat();
    let current = chat.settings.get_untracked();

    let api_base = RwSignal::new(current.api_base.clone());
    let max_results = RwSignal::new(current.max_results.to_string());
    let theme = RwSignal::new(current.theme);
    let position = RwSignal::new(current.position);
    let error = RwSignal::new(None::<String>);

    let on_save = move |_| {
        match settings_patch(&api_base.get(), &max_results.get(), theme.get(), position.get()) {
            Ok(patch) => {
                error.set(None);
                chat.save_settings(patch);
                on_close.run(());
            }
            Err(message) => error.set(Some(message)),
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()>
                <h2 class="dialog__title">"Settings"</h2>
                <label class="dialog__label">
                    "API base"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || api_base.get()
                        on:input=move |ev| api_base.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Max results"
                    <input
                        class="dialog__input"
                        type="number"
                        min="1"
                        prop:value=move || max_results.get()
                        on:input=move |ev| max_results.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Theme"
                    <select
                        class="dialog__input"
                        on:change=move |ev| theme.set(parse_theme(&event_target_value(&ev)))
                        prop:value=move || theme.get().as_str()
                    >
                        <option value="light">"Light"</option>
                        <option value="dark">"Dark"</option>
                    </select>
                </label>
                <label class="dialog__label">
                    "Widget position"
                    <select
                        class="dialog__input"
                        on:change=move |ev| position.set(parse_position(&event_target_value(&ev)))
                        prop:value=move || position.get().as_str()
                    >
                        <option value="bottom-right">"Bottom right"</option>
                        <option value="bottom-left">"Bottom left"</option>
                    </select>
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=on_save>"Save"</button>
                </div>
            </div>
        </div>
    }
}

/// Form values to a patch. Only the result count can be malformed.
fn settings_patch(api_base: &str, max_results: &str, theme: Theme, position: Position) -> Result<ConfigPatch, String> {
    let max_results = match max_results.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => return Err("Max results must be a whole number of at least 1".to_owned()),
    };
    Ok(ConfigPatch {
        api_base: Some(api_base.trim().to_owned()),
        max_results: Some(max_results),
        theme: Some(theme),
        position: Some(position),
        ..ConfigPatch::default()
    })
}

fn parse_theme(value: &str) -> Theme {
    if value == Theme::Dark.as_str() { Theme::Dark } else { Theme::Light }
}

fn parse_position(value: &str) -> Position {
    if value == Position::BottomLeft.as_str() { Position::BottomLeft } else { Position::BottomRight }
}
