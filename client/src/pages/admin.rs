//! Admin page for bot projects: list, create, scrape, delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Independent of the chat surfaces. Shares only the persisted API base.
//! `AdminConsole` owns the list; after each operation its state is copied
//! into a signal for rendering.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::rc::Rc;

use leptos::prelude::*;

use chatbot::admin::{AdminConsole, ProjectsState};
use chatbot::{ClientError, ConfigStore, TransportClient};

use crate::components::project_card::ProjectCard;
use crate::net::backend::BrowserBackend;
use crate::util::storage::BrowserStorage;

type BrowserAdmin = AdminConsole<BrowserBackend>;

#[derive(Clone, Copy)]
struct AdminContext {
    console: StoredValue<Rc<BrowserAdmin>, LocalStorage>,
    projects: RwSignal<ProjectsState>,
    flash: RwSignal<Option<String>>,
}

impl AdminContext {
    /// Run `op` on the console, then mirror its state.
    fn run<F, Fut>(self, op: F, done: &'static str)
    where
        F: FnOnce(Rc<BrowserAdmin>) -> Fut + 'static,
        Fut: std::future::Future<Output = Result<(), ClientError>> + 'static,
    {
        let Some(console) = self.console.try_get_value() else {
            return;
        };
        self.projects.update(|p| p.loading = true);
        leptos::task::spawn_local(async move {
            let result = op(console.clone()).await;
            self.projects.set(console.state());
            self.flash.set(Some(flash_message(done, &result)));
        });
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let config = ConfigStore::load(BrowserStorage);
    let transport = TransportClient::new(BrowserBackend::new(), config.handle());
    let ctx = AdminContext {
        console: StoredValue::new_local(Rc::new(AdminConsole::new(transport))),
        projects: RwSignal::new(ProjectsState::default()),
        flash: RwSignal::new(None),
    };
    let projects = ctx.projects;
    let flash = ctx.flash;

    ctx.run(|console| async move { console.load_projects().await.map(|_| ()) }, "");

    let name = RwSignal::new(String::new());
    let url = RwSignal::new(String::new());

    let on_create = move |_| {
        let (n, u) = (name.get_untracked(), url.get_untracked());
        ctx.run(
            move |console| async move {
                console.create_project(&n, &u).await?;
                name.set(String::new());
                url.set(String::new());
                Ok(())
            },
            "Project created",
        );
    };
    let on_scrape = Callback::new(move |id: String| {
        ctx.run(move |console| async move { console.trigger_scrape(&id).await }, "Scrape started");
    });
    let on_delete = Callback::new(move |id: String| {
        ctx.run(move |console| async move { console.delete_project(&id).await }, "Project deleted");
    });

    view! {
        <div class="admin-page">
            <header class="admin-page__header toolbar">
                <span class="toolbar__board-name">"Projects"</span>
                <span class="toolbar__spacer"></span>
                <a class="btn" href="/">"Back to chat"</a>
            </header>

            <div class="admin-page__form">
                <input
                    class="admin-page__input"
                    type="text"
                    placeholder="Project name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="admin-page__input"
                    type="url"
                    placeholder="https://example.com"
                    prop:value=move || url.get()
                    on:input=move |ev| url.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" on:click=on_create>"Create"</button>
            </div>

            <Show when=move || flash.get().is_some_and(|m| !m.is_empty())>
                <p class="admin-page__flash">{move || flash.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || projects.get().error.is_some()>
                <p class="admin-page__error">{move || projects.get().error.unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !projects.get().loading
                fallback=move || view! { <p>"Loading projects..."</p> }
            >
                <div class="admin-page__cards">
                    {move || {
                        projects
                            .get()
                            .items
                            .into_iter()
                            .map(|project| {
                                view! { <ProjectCard project=project on_scrape=on_scrape on_delete=on_delete/> }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </Show>
        </div>
    }
}

/// Feedback line after an admin action. Silent for a successful reload.
fn flash_message(done: &str, result: &Result<(), ClientError>) -> String {
    match result {
        Ok(()) => done.to_owned(),
        Err(e) => format!("Error: {e}"),
    }
}
