//! Query execution and task synchronisation.

use super::resolver::{ConnectionError, ConnectionResolver};
use crate::connector::{
    domain::{
        ConnectorInfo, IssueId, IssueSearch, LocalTask, MappingError, ProjectId, Query,
        RemoteIssue, RepositoryConfig, TaskData, TaskMapper,
    },
    ports::{
        IssueClient, IssueTransport, LocalTaskStore, SinkControl, TaskDataSink, TaskStoreError,
        TransportError,
    },
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Remote call that failed while serving a connector operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOperation {
    /// Listing the project's issues.
    ListIssues,
    /// Listing the comments of an issue.
    ListComments(IssueId),
    /// Fetching a single issue.
    GetIssue(IssueId),
}

impl fmt::Display for TransportOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListIssues => write!(f, "listing issues"),
            Self::ListComments(issue) => write!(f, "listing comments of issue #{issue}"),
            Self::GetIssue(issue) => write!(f, "fetching issue #{issue}"),
        }
    }
}

/// Errors surfaced by connector operations.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// No connection could be established.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// A remote call failed mid-operation.
    #[error("{operation} failed: {source}")]
    Transport {
        /// The failed remote call.
        operation: TransportOperation,
        /// Transport failure.
        source: TransportError,
    },

    /// Remote data could not be mapped.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The local task store failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for connector operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Counters of one query run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Issues evaluated against the filter.
    pub scanned: usize,
    /// Matching issues emitted to the sink.
    pub matched: usize,
}

/// How a query run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Every listed issue was scanned.
    Completed(QueryStats),
    /// The caller cancelled or the sink asked to stop.
    Cancelled(QueryStats),
}

impl QueryOutcome {
    /// Returns the run counters.
    #[must_use]
    pub const fn stats(&self) -> QueryStats {
        match self {
            Self::Completed(stats) | Self::Cancelled(stats) => *stats,
        }
    }

    /// Returns `true` when the run stopped early.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Connector binding a remote issue source to the local task store.
///
/// Holds no state across calls beyond the resolver's connection cache.
pub struct RepositoryConnector<T, S, C>
where
    T: IssueTransport,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    resolver: Arc<ConnectionResolver<T>>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<T, S, C> Clone for RepositoryConnector<T, S, C>
where
    T: IssueTransport,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, S, C> RepositoryConnector<T, S, C>
where
    T: IssueTransport,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a connector.
    #[must_use]
    pub const fn new(resolver: Arc<ConnectionResolver<T>>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            resolver,
            store,
            clock,
        }
    }

    /// Returns the connector descriptor.
    #[must_use]
    pub const fn info(&self) -> ConnectorInfo {
        ConnectorInfo::GITLAB
    }

    /// Returns the connection resolver.
    #[must_use]
    pub fn resolver(&self) -> &ConnectionResolver<T> {
        &self.resolver
    }

    /// Runs a saved search and streams every matching task to `sink`.
    ///
    /// Issues are scanned strictly in the order the remote source lists
    /// them; each match is mapped and handed to the sink before the next
    /// issue is looked at. `cancel` is checked between issues, never during a
    /// remote call. Matches already emitted stay emitted when a later issue
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when no connection can be established, a remote
    /// call fails, or a matching issue cannot be mapped.
    pub async fn run_query<K>(
        &self,
        config: &RepositoryConfig,
        query: &Query,
        sink: &mut K,
        cancel: &CancellationToken,
    ) -> QueryResult<QueryOutcome>
    where
        K: TaskDataSink + ?Sized,
    {
        let connection = self.resolver.resolve(config, false).await?;
        let project_id = connection.project_id();
        let issues = match connection.client().list_issues(project_id).await {
            Ok(issues) => issues,
            Err(source) => {
                if matches!(
                    source,
                    TransportError::Unauthorized(_) | TransportError::ProjectNotFound(_)
                ) {
                    self.resolver.invalidate_connection(&connection).await;
                }
                return Err(QueryError::Transport {
                    operation: TransportOperation::ListIssues,
                    source,
                });
            }
        };
        tracing::debug!(
            repository = %connection.key(),
            issues = issues.len(),
            criteria = query.criteria().len(),
            "running query"
        );

        let search = IssueSearch::new(query);
        let mut stats = QueryStats::default();
        for issue in &issues {
            if cancel.is_cancelled() {
                tracing::info!(scanned = stats.scanned, matched = stats.matched, "query cancelled");
                return Ok(QueryOutcome::Cancelled(stats));
            }
            stats.scanned += 1;
            if !search.matches(issue) {
                continue;
            }

            let task_data = download(connection.client(), project_id, issue)
                .await
                .inspect_err(|err| {
                    tracing::warn!(issue = issue.id(), error = %err, "query aborted");
                })?;
            stats.matched += 1;
            if sink.accept(task_data) == SinkControl::Stop {
                tracing::info!(scanned = stats.scanned, matched = stats.matched, "sink stopped query");
                return Ok(QueryOutcome::Cancelled(stats));
            }
        }

        tracing::debug!(scanned = stats.scanned, matched = stats.matched, "query finished");
        Ok(QueryOutcome::Completed(stats))
    }

    /// Downloads complete task data for one task.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Mapping`] when `task_id` is not a positive
    /// integer, [`QueryError::Transport`] with
    /// [`TransportError::IssueNotFound`] when the issue does not exist, and
    /// connection or transport errors otherwise.
    pub async fn get_task_data(
        &self,
        config: &RepositoryConfig,
        task_id: &str,
    ) -> QueryResult<TaskData> {
        let issue_id = IssueId::parse(task_id)?;
        let connection = self.resolver.resolve(config, false).await?;
        let project_id = connection.project_id();
        let operation = TransportOperation::GetIssue(issue_id);
        let issue = connection
            .client()
            .get_issue(project_id, issue_id)
            .await
            .map_err(|source| QueryError::Transport { operation, source })?
            .ok_or(QueryError::Transport {
                operation,
                source: TransportError::IssueNotFound(issue_id),
            })?;
        download(connection.client(), project_id, &issue).await
    }

    /// Re-runs the connection handshake for `config`, replacing any cached
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] when the handshake fails.
    pub async fn update_repository_configuration(
        &self,
        config: &RepositoryConfig,
    ) -> Result<(), ConnectionError> {
        self.resolver.resolve(config, true).await.map(|_| ())
    }

    /// Confirms that `config` reaches an existing project without touching
    /// the connection cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Unreachable`] for any failure.
    pub async fn validate(&self, config: &RepositoryConfig) -> Result<ProjectId, ConnectionError> {
        self.resolver.validate(config).await
    }

    /// Decides whether `task` is stale relative to `data`.
    #[must_use]
    pub fn has_task_changed(&self, data: &TaskData, task: &LocalTask) -> bool {
        TaskMapper::has_changed(data, task)
    }

    /// Writes the fields carried by `data` onto `task`.
    pub fn update_task_from_task_data(&self, data: &TaskData, task: &mut LocalTask) {
        TaskMapper::apply_to(data, task);
    }

    /// Brings the stored local task in line with `data`.
    ///
    /// Creates the local task when it is not cached yet, applies `data` when
    /// the task is stale, stamps the synchronisation time and saves it.
    /// Returns whether the task had changed.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Store`] when the local task store fails.
    pub async fn synchronize_task(&self, data: &TaskData) -> QueryResult<bool> {
        let mut task = self
            .store
            .find(data.task_key())
            .await?
            .unwrap_or_else(|| LocalTask::new(data.task_key().clone()));
        let changed = TaskMapper::has_changed(data, &task);
        if changed {
            TaskMapper::apply_to(data, &mut task);
        }
        task.synchronized_at = Some(self.clock.utc());
        self.store.save(&task).await?;
        tracing::debug!(task = %data.task_key(), changed, partial = data.is_partial(), "task synchronised");
        Ok(changed)
    }
}

async fn download<L>(client: &L, project_id: ProjectId, issue: &RemoteIssue) -> QueryResult<TaskData>
where
    L: IssueClient + ?Sized,
{
    let issue_id = IssueId::new(issue.id())?;
    let comments = client
        .list_comments(project_id, issue_id)
        .await
        .map_err(|source| QueryError::Transport {
            operation: TransportOperation::ListComments(issue_id),
            source,
        })?;
    Ok(TaskMapper::to_task_data(issue, &comments, false)?)
}
