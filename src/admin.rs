//! Admin console for bot projects: a list that reloads after every change.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::cell::RefCell;

use crate::error::{ClientError, ValidationError};
use crate::transport::{HttpBackend, NewProject, Project, TransportClient};

/// Project list shown by the admin page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectsState {
    pub items: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Check the create-project form.
///
/// # Errors
///
/// [`ValidationError::MissingField`] for a blank name or url and
/// [`ValidationError::InvalidUrl`] when the url is not http(s).
pub fn validate_new_project(name: &str, url: &str) -> Result<NewProject, ValidationError> {
    let name = name.trim();
    let url = url.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if url.is_empty() {
        return Err(ValidationError::MissingField("url"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::InvalidUrl(url.to_owned()));
    }
    Ok(NewProject { name: name.to_owned(), url: url.to_owned() })
}

pub struct AdminConsole<B> {
    transport: TransportClient<B>,
    state: RefCell<ProjectsState>,
}

impl<B: HttpBackend> AdminConsole<B> {
    pub fn new(transport: TransportClient<B>) -> Self {
        Self { transport, state: RefCell::new(ProjectsState::default()) }
    }

    #[must_use]
    pub fn state(&self) -> ProjectsState {
        self.state.borrow().clone()
    }

    /// Fetch the list. A failure empties it and records the message.
    ///
    /// # Errors
    ///
    /// Transport or remote failure of `GET /projects`.
    pub async fn load_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.state.borrow_mut().loading = true;
        let result = self.transport.list_projects().await;
        let mut state = self.state.borrow_mut();
        state.loading = false;
        match &result {
            Ok(items) => {
                state.items.clone_from(items);
                state.error = None;
                tracing::debug!(count = items.len(), "projects loaded");
            }
            Err(e) => {
                state.items.clear();
                state.error = Some(e.to_string());
                tracing::warn!(error = %e, "project list failed");
            }
        }
        result
    }

    /// Validate, create, then reload the list.
    ///
    /// # Errors
    ///
    /// Validation failures never reach the network; otherwise transport or
    /// remote failure of the create call. A failed reload is recorded in
    /// [`ProjectsState::error`] but does not fail the create.
    pub async fn create_project(&self, name: &str, url: &str) -> Result<Project, ClientError> {
        let project = validate_new_project(name, url)?;
        let created = self.transport.create_project(&project).await?;
        tracing::info!(id = %created.id, name = %created.name, "project created");
        self.reload().await;
        Ok(created)
    }

    /// # Errors
    ///
    /// Transport or remote failure, including an ack carrying `error`.
    pub async fn delete_project(&self, id: &str) -> Result<(), ClientError> {
        self.transport.delete_project(id).await?;
        tracing::info!(%id, "project deleted");
        self.reload().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Transport or remote failure, including an ack carrying `error`.
    pub async fn trigger_scrape(&self, id: &str) -> Result<(), ClientError> {
        self.transport.trigger_scrape(id).await?;
        tracing::info!(%id, "scrape started");
        self.reload().await;
        Ok(())
    }

    async fn reload(&self) {
        // Outcome is already reflected in `state`.
        let _ = self.load_projects().await;
    }
}
