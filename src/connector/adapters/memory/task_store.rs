//! In-memory local task store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::connector::{
    domain::{LocalTask, TaskKey},
    ports::{LocalTaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory local task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskKey, LocalTask>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalTaskStore for InMemoryTaskStore {
    async fn find(&self, task_key: &TaskKey) -> TaskStoreResult<Option<LocalTask>> {
        let tasks = self
            .tasks
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(tasks.get(task_key).cloned())
    }

    async fn save(&self, task: &LocalTask) -> TaskStoreResult<()> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        tasks.insert(task.task_key.clone(), task.clone());
        Ok(())
    }
}
