//! In-memory issue transport for connector tests and scripted sources.

use crate::connector::{
    domain::{IssueId, ProjectId, RemoteComment, RemoteIssue, RepositoryConfig},
    ports::{IssueClient, IssueTransport, TransportError, TransportResult},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory issue source.
///
/// Holds projects, issues and comments in memory and counts handshakes so
/// tests can observe connection caching. Failures can be injected per issue
/// or for the whole source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueTransport {
    state: Arc<RwLock<InMemorySourceState>>,
}

#[derive(Debug, Default)]
struct InMemorySourceState {
    accepted_tokens: HashSet<String>,
    projects: HashMap<String, ProjectId>,
    issues: HashMap<ProjectId, Vec<RemoteIssue>>,
    comments: HashMap<(ProjectId, u64), Vec<RemoteComment>>,
    failing_comments: HashSet<(ProjectId, u64)>,
    offline: bool,
    authentications: usize,
}

fn lock_error(err: impl ToString) -> TransportError {
    TransportError::network(std::io::Error::other(err.to_string()))
}

fn read_state(
    state: &RwLock<InMemorySourceState>,
) -> TransportResult<RwLockReadGuard<'_, InMemorySourceState>> {
    state.read().map_err(lock_error)
}

fn write_state(
    state: &RwLock<InMemorySourceState>,
) -> TransportResult<RwLockWriteGuard<'_, InMemorySourceState>> {
    state.write().map_err(lock_error)
}

impl InMemoryIssueTransport {
    /// Creates an empty source that accepts no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts an access token during authentication.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn accept_token(&self, token: impl Into<String>) -> TransportResult<()> {
        let mut state = write_state(&self.state)?;
        state.accepted_tokens.insert(token.into());
        Ok(())
    }

    /// Registers a project under its path.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn add_project(&self, path: impl Into<String>, project_id: ProjectId) -> TransportResult<()> {
        let mut state = write_state(&self.state)?;
        state.projects.insert(path.into(), project_id);
        state.issues.entry(project_id).or_default();
        Ok(())
    }

    /// Appends an issue to a project's issue list.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn push_issue(&self, project_id: ProjectId, issue: RemoteIssue) -> TransportResult<()> {
        let mut state = write_state(&self.state)?;
        state.issues.entry(project_id).or_default().push(issue);
        Ok(())
    }

    /// Replaces an issue with the same id, or appends it when absent.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn upsert_issue(&self, project_id: ProjectId, issue: RemoteIssue) -> TransportResult<()> {
        let mut state = write_state(&self.state)?;
        let issues = state.issues.entry(project_id).or_default();
        match issues.iter_mut().find(|existing| existing.id() == issue.id()) {
            Some(existing) => *existing = issue,
            None => issues.push(issue),
        }
        Ok(())
    }

    /// Replaces the comments of an issue.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn set_comments(
        &self,
        project_id: ProjectId,
        issue_id: u64,
        comments: Vec<RemoteComment>,
    ) -> TransportResult<()> {
        let mut state = write_state(&self.state)?;
        state.comments.insert((project_id, issue_id), comments);
        Ok(())
    }

    /// Makes comment listing for one issue fail with a network error.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_comments_for(&self, project_id: ProjectId, issue_id: u64) -> TransportResult<()> {
        let mut state = write_state(&self.state)?;
        state.failing_comments.insert((project_id, issue_id));
        Ok(())
    }

    /// Makes every call fail with a network error while `offline` is set.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn set_offline(&self, offline: bool) -> TransportResult<()> {
        let mut state = write_state(&self.state)?;
        state.offline = offline;
        Ok(())
    }

    /// Returns how many authentication handshakes were attempted.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn authentication_count(&self) -> TransportResult<usize> {
        Ok(read_state(&self.state)?.authentications)
    }
}

fn unreachable_source() -> TransportError {
    TransportError::network(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "remote source unreachable",
    ))
}

#[async_trait]
impl IssueTransport for InMemoryIssueTransport {
    type Client = InMemoryIssueClient;

    async fn authenticate(&self, config: &RepositoryConfig) -> TransportResult<Self::Client> {
        {
            let mut state = write_state(&self.state)?;
            state.authentications += 1;
            if state.offline {
                return Err(unreachable_source());
            }
            if !state.accepted_tokens.contains(config.token()) {
                return Err(TransportError::Unauthorized(format!(
                    "token rejected by {}",
                    config.base_url()
                )));
            }
        }
        // Lets concurrent resolvers interleave with an in-flight handshake.
        tokio::task::yield_now().await;
        Ok(InMemoryIssueClient {
            state: Arc::clone(&self.state),
        })
    }
}

/// Client handle issued by [`InMemoryIssueTransport`].
#[derive(Debug, Clone)]
pub struct InMemoryIssueClient {
    state: Arc<RwLock<InMemorySourceState>>,
}

impl InMemoryIssueClient {
    fn online_state(&self) -> TransportResult<RwLockReadGuard<'_, InMemorySourceState>> {
        let state = read_state(&self.state)?;
        if state.offline {
            return Err(unreachable_source());
        }
        Ok(state)
    }
}

#[async_trait]
impl IssueClient for InMemoryIssueClient {
    async fn lookup_project(&self, project: &str) -> TransportResult<ProjectId> {
        let state = self.online_state()?;
        state
            .projects
            .get(project)
            .copied()
            .ok_or_else(|| TransportError::ProjectNotFound(project.to_owned()))
    }

    async fn list_issues(&self, project: ProjectId) -> TransportResult<Vec<RemoteIssue>> {
        let state = self.online_state()?;
        state
            .issues
            .get(&project)
            .cloned()
            .ok_or_else(|| TransportError::ProjectNotFound(project.to_string()))
    }

    async fn list_comments(
        &self,
        project: ProjectId,
        issue: IssueId,
    ) -> TransportResult<Vec<RemoteComment>> {
        let state = self.online_state()?;
        let key = (project, issue.value());
        if state.failing_comments.contains(&key) {
            return Err(TransportError::network(std::io::Error::other(format!(
                "comment listing failed for issue #{issue}"
            ))));
        }
        Ok(state.comments.get(&key).cloned().unwrap_or_default())
    }

    async fn get_issue(
        &self,
        project: ProjectId,
        issue: IssueId,
    ) -> TransportResult<Option<RemoteIssue>> {
        let state = self.online_state()?;
        Ok(state.issues.get(&project).and_then(|issues| {
            issues
                .iter()
                .find(|candidate| candidate.id() == issue.value())
                .cloned()
        }))
    }
}
