//! Card for one bot project on the admin page.

#[cfg(test)]
#[path = "project_card_test.rs"]
mod project_card_test;

use leptos::prelude::*;

use chatbot::transport::{Project, ProjectStatus};

#[component]
pub fn ProjectCard(project: Project, on_scrape: Callback<String>, on_delete: Callback<String>) -> impl IntoView {
    let scrape_id = project.id.clone();
    let delete_id = project.id.clone();
    let can_scrape = project.status.can_scrape();

    view! {
        <div class="project-card">
            <span class="project-card__name">{project.name}</span>
            <a class="project-card__url" href=project.url.clone() target="_blank" rel="noopener">
                {project.url.clone()}
            </a>
            <span class=status_class(&project.status)>{status_label(&project.status)}</span>
            <span class="project-card__meta">{project.created_at.unwrap_or_default()}</span>
            <div class="project-card__actions">
                <button
                    class="btn"
                    disabled=!can_scrape
                    title="Scrape website content"
                    on:click=move |_| on_scrape.run(scrape_id.clone())
                >
                    "Scrape"
                </button>
                <button
                    class="btn btn--danger"
                    title="Delete project"
                    on:click=move |_| on_delete.run(delete_id.clone())
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

fn status_class(status: &ProjectStatus) -> String {
    format!("project-card__status project-card__status--{}", status.as_str())
}

fn status_label(status: &ProjectStatus) -> String {
    status.as_str().replace('_', " ")
}
