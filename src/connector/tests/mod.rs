//! Unit tests for the connector module.
//!
//! Tests are organised by component: query parsing and filtering, task
//! mapping and change detection, connection resolution, and query execution.
