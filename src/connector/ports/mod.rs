//! Port contracts for the repository connector.
//!
//! Ports define the collaborators the connector consumes: the remote issue
//! transport, the result sink and the local task store.

pub mod sink;
pub mod task_store;
pub mod transport;

pub use sink::{SinkControl, TaskDataSink};
pub use task_store::{LocalTaskStore, TaskStoreError, TaskStoreResult};
pub use transport::{IssueClient, IssueTransport, TransportError, TransportResult};
