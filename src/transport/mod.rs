//! Outbound calls to the assistant service.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`HttpBackend`] is the only platform-specific piece: the browser backend
//! wraps `fetch`, the CLI backend wraps `reqwest`. Backends move bytes and
//! report "no response" as [`ClientError::Transport`]; everything else
//! (URL building, serialization, status and body normalization) happens in
//! [`TransportClient`] so every platform fails the same way.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses and undecodable bodies become [`ClientError::Remote`].
//! Nothing here retries; the caller owns the retry policy.

pub mod parse;
pub mod types;

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::ConfigHandle;
use crate::error::{ClientError, ValidationError};
use crate::upload::Document;
pub use types::{
    ChatReply, ChatRequest, CreatedProject, KnowledgeBaseStats, NewProject, Project, ProjectList, ProjectStatus,
    StatusReport, UploadAck,
};

// =============================================================================
// BACKEND SEAM
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form with the document under the `file` field.
    Multipart(Document),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

/// Raw response as received. The body is left undecoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Platform HTTP client.
#[async_trait(?Send)]
pub trait HttpBackend {
    /// Perform one request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response was received,
    /// including timeouts. Any HTTP status, success or not, is `Ok`.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

#[async_trait(?Send)]
impl<T: HttpBackend + ?Sized> HttpBackend for std::rc::Rc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        (**self).execute(request).await
    }
}

/// Join the configured base with an endpoint path.
#[must_use]
pub fn endpoint(api_base: &str, path: &str) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), path.trim_start_matches('/'))
}

// =============================================================================
// CLIENT
// =============================================================================

/// One call per remote capability. Holds no state besides the backend and a
/// view of the current settings.
pub struct TransportClient<B> {
    backend: B,
    config: ConfigHandle,
}

impl<B: HttpBackend> TransportClient<B> {
    pub fn new(backend: B, config: ConfigHandle) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// `GET /status`.
    ///
    /// # Errors
    ///
    /// Transport or remote failure; see the module docs.
    pub async fn get_status(&self) -> Result<StatusReport, ClientError> {
        let response = self.send(Method::Get, "status", RequestBody::Empty).await?;
        parse::decode(&response)
    }

    /// `GET /knowledge_base`.
    ///
    /// # Errors
    ///
    /// Transport or remote failure; see the module docs.
    pub async fn get_knowledge_base_stats(&self) -> Result<KnowledgeBaseStats, ClientError> {
        let response = self.send(Method::Get, "knowledge_base", RequestBody::Empty).await?;
        parse::decode(&response)
    }

    /// `POST /upload_document` as multipart. The document is validated first
    /// so an oversized or unsupported file never leaves the client.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] for a rejected document, otherwise
    /// transport or remote failure.
    pub async fn upload_document(&self, document: Document) -> Result<UploadAck, ClientError> {
        document.validate()?;
        let response = self.send(Method::Post, "upload_document", RequestBody::Multipart(document)).await?;
        parse::decode(&response)
    }

    /// `POST /chat`; returns the assistant's reply text.
    ///
    /// # Errors
    ///
    /// Transport or remote failure; see the module docs.
    pub async fn send_chat_message(&self, text: &str, session_id: &str) -> Result<String, ClientError> {
        let body = json_body(&ChatRequest { message: text.to_owned(), session_id: session_id.to_owned() })?;
        let response = self.send(Method::Post, "chat", body).await?;
        let reply: ChatReply = parse::decode(&response)?;
        Ok(reply.response)
    }

    /// `GET /projects`.
    ///
    /// # Errors
    ///
    /// Transport or remote failure; see the module docs.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.send(Method::Get, "projects", RequestBody::Empty).await?;
        let list: ProjectList = parse::decode(&response)?;
        Ok(list.projects)
    }

    /// `POST /projects`.
    ///
    /// # Errors
    ///
    /// Transport or remote failure; see the module docs.
    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        let response = self.send(Method::Post, "projects", json_body(project)?).await?;
        let created: CreatedProject = parse::decode(&response)?;
        Ok(created.into_project())
    }

    /// `DELETE /projects/{id}`.
    ///
    /// # Errors
    ///
    /// Transport or remote failure, including a 2xx ack carrying `error`.
    pub async fn delete_project(&self, id: &str) -> Result<Value, ClientError> {
        let path = format!("projects/{}", path_segment(id)?);
        let response = self.send(Method::Delete, &path, RequestBody::Empty).await?;
        parse::decode_ack(&response)
    }

    /// `POST /projects/{id}/scrape`.
    ///
    /// # Errors
    ///
    /// Transport or remote failure, including a 2xx ack carrying `error`.
    pub async fn trigger_scrape(&self, id: &str) -> Result<Value, ClientError> {
        let path = format!("projects/{}/scrape", path_segment(id)?);
        let response = self.send(Method::Post, &path, RequestBody::Empty).await?;
        parse::decode_ack(&response)
    }

    async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<HttpResponse, ClientError> {
        let url = endpoint(&self.config.api_base(), path);
        tracing::debug!(method = method.as_str(), %url, "request");
        let result = self.backend.execute(HttpRequest { method, url: url.clone(), body }).await;
        match &result {
            Ok(response) => tracing::debug!(method = method.as_str(), %url, status = response.status, "response"),
            Err(e) => tracing::warn!(method = method.as_str(), %url, error = %e, "request failed"),
        }
        result
    }
}

/// Encoding happens before any request exists, so a failure is local.
fn json_body<T: Serialize>(value: &T) -> Result<RequestBody, ClientError> {
    serde_json::to_value(value)
        .map(RequestBody::Json)
        .map_err(|e| ValidationError::Unencodable(e.to_string()).into())
}

fn path_segment(id: &str) -> Result<&str, ClientError> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') {
        return Err(ValidationError::MissingField("project id").into());
    }
    Ok(id)
}
