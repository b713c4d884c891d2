//! Document upload: file picker plus drag-and-drop target.
//!
//! SYSTEM CONTEXT
//! ==============
//! Name and size are checked before the file is read into memory, so an
//! oversized file fails fast. The read bytes go to the core as
//! `Intent::UploadDocument`, which validates again and reports the outcome.

#[cfg(test)]
#[path = "upload_area_test.rs"]
mod upload_area_test;

use leptos::prelude::*;

use chatbot::upload::{ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};

use crate::app::use_chat;

#[component]
pub fn UploadArea() -> impl IntoView {
    let chat = use_chat();
    let view = chat.view;
    let dragging = RwSignal::new(false);

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                upload_file(chat, file);
            }
            input.set_value("");
        }
        #[cfg(not(feature = "csr"))]
        let _ = (ev, chat);
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
        #[cfg(feature = "csr")]
        {
            if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0)) {
                upload_file(chat, file);
            }
        }
    };

    view! {
        <div
            class="upload-area"
            class:upload-area--dragging=move || dragging.get()
            class:upload-area--busy=move || view.get().uploading
            on:dragover=move |ev: leptos::ev::DragEvent| {
                ev.prevent_default();
                dragging.set(true);
            }
            on:dragleave=move |_| dragging.set(false)
            on:drop=on_drop
        >
            <label class="upload-area__label">
                {move || if view.get().uploading { "Uploading..." } else { "Drop a document or click to upload" }}
                <input
                    class="upload-area__input"
                    type="file"
                    accept=accept_attribute()
                    disabled=move || view.get().uploading
                    on:change=on_change
                />
            </label>
            <span class="upload-area__hint">{upload_hint()}</span>
        </div>
    }
}

#[cfg(feature = "csr")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn upload_file(chat: crate::app::ChatContext, file: web_sys::File) {
    use chatbot::upload::{Document, validate_upload};
    use chatbot::{Intent, Presenter, Severity};

    let Some(app) = chat.app() else {
        return;
    };
    let name = file.name();
    if let Err(e) = validate_upload(&name, file.size() as u64) {
        app.presenter().notify(&e.to_string(), Severity::Error);
        return;
    }
    leptos::task::spawn_local(async move {
        match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                app.dispatch(Intent::UploadDocument(Document::new(name, bytes))).await;
            }
            Err(e) => {
                leptos::logging::warn!("file read failed: {e:?}");
                app.presenter().notify(&format!("Upload failed: could not read {name}"), Severity::Error);
            }
        }
    });
}

fn accept_attribute() -> String {
    ALLOWED_EXTENSIONS.iter().map(|ext| format!(".{ext}")).collect::<Vec<_>>().join(",")
}

fn upload_hint() -> String {
    let kinds = ALLOWED_EXTENSIONS.iter().map(|ext| ext.to_ascii_uppercase()).collect::<Vec<_>>().join(", ");
    format!("{kinds} up to {} MB", MAX_UPLOAD_BYTES / (1024 * 1024))
}
