//! Shared world state for issue query BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskbridge::connector::{
    adapters::memory::{InMemoryIssueTransport, InMemoryTaskStore},
    domain::{ProjectId, RepositoryConfig, TaskData},
    services::{ConnectionResolver, QueryOutcome, QueryResult, RepositoryConnector},
};
use tokio_util::sync::CancellationToken;

/// Connector type used by the BDD world.
pub type TestConnector =
    RepositoryConnector<InMemoryIssueTransport, InMemoryTaskStore, DefaultClock>;

/// Scenario world for issue query behaviour tests.
pub struct QueryWorld {
    pub transport: Arc<InMemoryIssueTransport>,
    pub connector: TestConnector,
    pub project_id: Option<ProjectId>,
    pub config: Option<RepositoryConfig>,
    pub cancel: CancellationToken,
    pub received: Vec<TaskData>,
    pub last_result: Option<QueryResult<QueryOutcome>>,
}

impl QueryWorld {
    /// Creates a world with an empty remote source.
    #[must_use]
    pub fn new() -> Self {
        let transport = Arc::new(InMemoryIssueTransport::new());
        let connector = RepositoryConnector::new(
            Arc::new(ConnectionResolver::new(Arc::clone(&transport))),
            Arc::new(InMemoryTaskStore::new()),
            Arc::new(DefaultClock),
        );
        Self {
            transport,
            connector,
            project_id: None,
            config: None,
            cancel: CancellationToken::new(),
            received: Vec::new(),
            last_result: None,
        }
    }

    /// Returns the project registered by the background step.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing remote project in scenario world"))
    }
}

impl Default for QueryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> QueryWorld {
    QueryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
