//! Taskbridge: task synchronisation core for issue tracker connectors.
//!
//! This crate binds a remote issue tracker such as a GitLab project to a
//! task-management host, translating between the tracker's issue model and a
//! tracker-neutral task record.
//!
//! # Architecture
//!
//! Taskbridge follows hexagonal architecture principles:
//!
//! - **Domain**: Pure filtering and mapping logic with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the remote source, result
//!   sinks and the local task store
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`connector`]: Connection resolution, saved-search execution and task
//!   change detection

pub mod connector;
