//! Repository connector binding a remote issue tracker to local tasks.
//!
//! The connector runs saved searches against a remote issue source, decides
//! whether locally cached tasks are stale, and maps remote issues onto a
//! tracker-neutral task-data record and back. It follows hexagonal
//! architecture:
//!
//! - Domain types and pure filtering/mapping logic in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use taskbridge::connector::{
//!     adapters::memory::{CollectingSink, InMemoryIssueTransport, InMemoryTaskStore},
//!     domain::{ProjectId, Query, RemoteIssue, RepositoryConfig},
//!     services::{ConnectionResolver, RepositoryConnector},
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
//! let transport = InMemoryIssueTransport::new();
//! transport.accept_token("secret").expect("token registered");
//! let project = ProjectId::new(7).expect("valid project id");
//! transport.add_project("team/app", project).expect("project registered");
//! transport
//!     .push_issue(project, RemoteIssue::new(1, "Fix login bug", "opened", chrono::Utc::now()))
//!     .expect("issue registered");
//!
//! let connector = RepositoryConnector::new(
//!     Arc::new(ConnectionResolver::new(Arc::new(transport))),
//!     Arc::new(InMemoryTaskStore::new()),
//!     Arc::new(DefaultClock),
//! );
//! let config = RepositoryConfig::new("https://gitlab.example.com", "secret", "team/app")
//!     .expect("valid configuration");
//! let mut sink = CollectingSink::new();
//! connector
//!     .run_query(&config, &Query::new(), &mut sink, &CancellationToken::new())
//!     .await
//!     .expect("query succeeds");
//! assert_eq!(sink.collected().len(), 1);
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
