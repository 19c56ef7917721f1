//! In-memory adapters for the connector ports.
//!
//! Suitable for tests and for hosts that script a remote source. Not a
//! substitute for a real tracker client.

mod sink;
mod task_store;
mod transport;

pub use sink::CollectingSink;
pub use task_store::InMemoryTaskStore;
pub use transport::{InMemoryIssueClient, InMemoryIssueTransport};
