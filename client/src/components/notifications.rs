//! Toast stack for transient notifications.

use leptos::prelude::*;

use chatbot::Severity;

use crate::app::use_chat;

#[component]
pub fn Notifications() -> impl IntoView {
    let view = use_chat().view;

    view! {
        <div class="notifications" role="status" aria-live="polite">
            <For
                each=move || view.get().notices
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice_class(notice.severity) on:click=move |_| view.update(|v| v.dismiss(id))>
                            {notice.text}
                        </div>
                    }
                }
            />
        </div>
    }
}

pub(crate) fn notice_class(severity: Severity) -> String {
    format!("notification notification--{}", severity.as_str())
}
