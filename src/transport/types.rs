//! Wire DTOs for the assistant service's JSON surface.
//!
//! DESIGN
//! ======
//! Response types are lenient: every field the client does not strictly need
//! carries a serde default, so a server that adds or omits informational
//! fields never turns a success into a "malformed response" failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// `GET /status` body. Any 2xx counts as online; the counts, when present,
/// double as knowledge-base statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusReport {
    pub status: Option<String>,
    pub vector_store_size: Option<u64>,
    pub total_documents: Option<u64>,
    pub models_loaded: Option<bool>,
    pub supported_formats: Vec<String>,
}

impl StatusReport {
    /// Statistics carried by the report, if it has either count. A missing
    /// count reads as zero.
    #[must_use]
    pub fn knowledge_base(&self) -> Option<KnowledgeBaseStats> {
        if self.vector_store_size.is_none() && self.total_documents.is_none() {
            return None;
        }
        Some(KnowledgeBaseStats {
            vector_store_size: self.vector_store_size.unwrap_or(0),
            total_documents: self.total_documents.unwrap_or(0),
        })
    }
}

/// `GET /knowledge_base` body. Missing counts read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseStats {
    pub vector_store_size: u64,
    pub total_documents: u64,
}

/// `POST /chat` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// `POST /chat` success body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// `POST /upload_document` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadAck {
    pub message: Option<String>,
    pub filename: Option<String>,
    pub file_id: Option<String>,
    pub pages_processed: Option<u64>,
}

/// Lifecycle of a bot project on the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Created,
    Scraping,
    Scraped,
    Training,
    Ready,
    ScrapingFailed,
    Error,
    #[serde(other)]
    Other,
}

impl ProjectStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Scraping => "scraping",
            Self::Scraped => "scraped",
            Self::Training => "training",
            Self::Ready => "ready",
            Self::ScrapingFailed => "scraping_failed",
            Self::Error => "error",
            Self::Other => "other",
        }
    }

    /// Whether a scrape may be started from this state.
    #[must_use]
    pub fn can_scrape(&self) -> bool {
        !matches!(self, Self::Scraping | Self::Training)
    }
}

/// A bot project as listed by the admin endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `GET /projects` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// `POST /projects` success body: the record itself or wrapped as
/// `{"project": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CreatedProject {
    Wrapped { project: Project },
    Bare(Project),
}

impl CreatedProject {
    #[must_use]
    pub fn into_project(self) -> Project {
        match self {
            Self::Wrapped { project } | Self::Bare(project) => project,
        }
    }
}

/// `POST /projects` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub url: String,
}
