use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DocResult;
use crate::model::{DocKind, Snapshot};
use crate::record::{Identity, Project, SectionFeedback, Version};

/// Trait for LLM providers used for generation and refinement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}

/// Append-only version history. Versions are never updated or deleted once
/// written.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Append a snapshot. The store assigns the next `version_number` for the
    /// project and marks the new version current.
    async fn create_version(&self, project_id: Uuid, snapshot: Snapshot) -> DocResult<Version>;

    async fn get_version(&self, project_id: Uuid, version_id: Uuid) -> DocResult<Version>;

    /// All versions of a project, newest first.
    async fn list_versions(&self, project_id: Uuid) -> DocResult<Vec<Version>>;

    async fn current_version(&self, project_id: Uuid) -> DocResult<Option<Version>>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, user_id: &str, title: &str, kind: DocKind) -> DocResult<Project>;

    async fn get_project(&self, project_id: Uuid) -> DocResult<Project>;

    /// A user's projects, newest first.
    async fn list_projects(&self, user_id: &str) -> DocResult<Vec<Project>>;
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Record a like/dislike, keeping any existing comment.
    async fn set_reaction(
        &self,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
        liked: bool,
    ) -> DocResult<SectionFeedback>;

    /// Record a comment, keeping any existing like/dislike.
    async fn set_comment(
        &self,
        version_id: Uuid,
        user_id: &str,
        section_title: &str,
        comment: &str,
    ) -> DocResult<SectionFeedback>;

    async fn list_feedback(&self, version_id: Uuid, user_id: &str) -> DocResult<Vec<SectionFeedback>>;
}

/// Resolves a bearer credential to the calling user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, bearer: &str) -> DocResult<Identity>;
}
