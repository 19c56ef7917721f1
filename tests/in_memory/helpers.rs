//! Shared test helpers for in-memory connector integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskbridge::connector::{
    adapters::memory::{InMemoryIssueTransport, InMemoryTaskStore},
    domain::{ProjectId, RemoteIssue, RepositoryConfig},
    services::{ConnectionResolver, RepositoryConnector},
};

/// Access token accepted by the scripted source.
pub const TOKEN: &str = "glpat-integration";

/// Project path served by the scripted source.
pub const PROJECT_PATH: &str = "acme/storefront";

/// Connector type used by the integration tests.
pub type TestConnector =
    RepositoryConnector<InMemoryIssueTransport, InMemoryTaskStore, DefaultClock>;

/// Scripted source, its connector and the backing local store.
pub struct Harness {
    pub transport: Arc<InMemoryIssueTransport>,
    pub store: InMemoryTaskStore,
    pub connector: TestConnector,
}

/// Provides a connector bound to a source serving one empty project.
///
/// # Panics
///
/// Panics if the scripted source cannot be configured.
#[fixture]
pub fn harness() -> Harness {
    let transport = Arc::new(InMemoryIssueTransport::new());
    transport.accept_token(TOKEN).expect("token registered");
    transport
        .add_project(PROJECT_PATH, project_id())
        .expect("project registered");
    let store = InMemoryTaskStore::new();
    let connector = RepositoryConnector::new(
        Arc::new(ConnectionResolver::new(Arc::clone(&transport))),
        Arc::new(store.clone()),
        Arc::new(DefaultClock),
    );
    Harness {
        transport,
        store,
        connector,
    }
}

/// Returns the project id served by the scripted source.
///
/// # Panics
///
/// Panics if the constant id is rejected.
#[must_use]
pub fn project_id() -> ProjectId {
    ProjectId::new(7).expect("valid project id")
}

/// Returns a configuration reaching the scripted project.
///
/// # Panics
///
/// Panics if the configuration is rejected.
#[must_use]
pub fn config() -> RepositoryConfig {
    RepositoryConfig::new("https://gitlab.acme.test", TOKEN, PROJECT_PATH)
        .expect("valid configuration")
}

/// Returns a fixed timestamp offset by `seconds`.
///
/// # Panics
///
/// Panics if the offset leaves chrono's supported range.
#[must_use]
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_710_000_000 + seconds, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds an issue last modified at `at(updated)`.
#[must_use]
pub fn issue(id: u64, title: &str, state: &str, updated: i64) -> RemoteIssue {
    RemoteIssue::new(id, title, state, at(0)).with_updated_at(at(updated))
}

/// Publishes issues to the scripted project.
///
/// # Errors
///
/// Returns an error if the scripted source rejects an issue.
pub fn publish(
    harness: &Harness,
    issues: impl IntoIterator<Item = RemoteIssue>,
) -> Result<(), eyre::Report> {
    for remote_issue in issues {
        harness.transport.upsert_issue(project_id(), remote_issue)?;
    }
    Ok(())
}
