//! Local task store port.

use crate::connector::domain::{LocalTask, TaskKey};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for local task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Read and write access to the hosting framework's local tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalTaskStore: Send + Sync {
    /// Finds a local task by key.
    ///
    /// Returns `None` when the task is not cached locally.
    async fn find(&self, task_key: &TaskKey) -> TaskStoreResult<Option<LocalTask>>;

    /// Inserts or replaces a local task.
    async fn save(&self, task: &LocalTask) -> TaskStoreResult<()>;
}

/// Errors returned by local task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Persistence-layer failure.
    #[error("task store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
