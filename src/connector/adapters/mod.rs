//! Adapter implementations for the connector ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryIssueTransport`]: scripted remote issue source
//! - [`memory::InMemoryTaskStore`]: thread-safe local task store
//! - [`memory::CollectingSink`]: sink keeping query results in scan order

pub mod memory;
