//! Transport ports for talking to the remote issue source.

use crate::connector::domain::{
    IssueId, ProjectId, RemoteComment, RemoteIssue, RepositoryConfig,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Entry point to a remote issue source.
///
/// Timeouts and retries are the adapter's concern; the connector surfaces
/// whatever failure the adapter reports.
#[async_trait]
pub trait IssueTransport: Send + Sync {
    /// Client handle produced by a successful authentication.
    type Client: IssueClient + 'static;

    /// Authenticates with the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unauthorized`] when the credentials are
    /// rejected or [`TransportError::Network`] when the source is unreachable.
    async fn authenticate(&self, config: &RepositoryConfig) -> TransportResult<Self::Client>;
}

/// Authenticated client for one remote source.
#[async_trait]
pub trait IssueClient: Send + Sync {
    /// Resolves a project identifier such as `group/project` to its numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ProjectNotFound`] for unknown projects.
    async fn lookup_project(&self, project: &str) -> TransportResult<ProjectId>;

    /// Lists every issue of a project in the order the source reports them.
    ///
    /// Paging, if the source needs it, happens inside the adapter.
    async fn list_issues(&self, project: ProjectId) -> TransportResult<Vec<RemoteIssue>>;

    /// Lists the comments of one issue in remote order.
    async fn list_comments(
        &self,
        project: ProjectId,
        issue: IssueId,
    ) -> TransportResult<Vec<RemoteComment>>;

    /// Fetches a single issue.
    ///
    /// Returns `None` when the issue does not exist.
    async fn get_issue(
        &self,
        project: ProjectId,
        issue: IssueId,
    ) -> TransportResult<Option<RemoteIssue>>;
}

/// Errors returned by transport adapters.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The remote source rejected the credentials.
    #[error("authentication rejected: {0}")]
    Unauthorized(String),

    /// The configured project does not exist or is not visible.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// The requested issue does not exist.
    #[error("issue not found: #{0}")]
    IssueNotFound(IssueId),

    /// Network or protocol failure.
    #[error("network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a network or protocol error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }
}
