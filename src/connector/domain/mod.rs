//! Domain model for the repository connector.
//!
//! The connector domain models repository configuration, remote issues,
//! saved-search criteria and the neutral task-data record, together with the
//! pure logic that filters issues and maps them onto local tasks. Nothing in
//! this module performs I/O.

mod config;
mod connection;
mod error;
mod ids;
mod issue;
mod local_task;
mod mapper;
mod query;
mod search;
mod task_data;

pub use config::{ConfigKey, RepositoryConfig};
pub use connection::{Connection, ConnectorInfo};
pub use error::{ConnectorDomainError, MappingError, ParseIssueStateError};
pub use ids::{IssueId, ProjectId, TaskKey};
pub use issue::{IssueState, RemoteComment, RemoteIssue};
pub use local_task::LocalTask;
pub use mapper::TaskMapper;
pub use query::{Criterion, Query, StatusFilter, TextField, TextMatch};
pub use search::IssueSearch;
pub use task_data::{FieldValue, TaskComment, TaskData, TaskStatus};
