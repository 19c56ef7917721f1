//! Local task representation held by the hosting task framework.

use super::{TaskComment, TaskKey, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field values of a locally cached task.
///
/// `modified_at` is the last-known remote modification timestamp and drives
/// change detection for complete task data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTask {
    /// Task key.
    pub task_key: TaskKey,
    /// Task summary.
    pub summary: Option<String>,
    /// Task description.
    pub description: Option<String>,
    /// Task status.
    pub status: Option<TaskStatus>,
    /// Reporting user.
    pub reporter: Option<String>,
    /// Owning (assigned) user.
    pub owner: Option<String>,
    /// Labels in remote order.
    pub labels: Vec<String>,
    /// Milestone title.
    pub milestone: Option<String>,
    /// Remote creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last-known remote modification timestamp.
    pub modified_at: Option<DateTime<Utc>>,
    /// Comments in remote order.
    pub comments: Vec<TaskComment>,
    /// When the task was last synchronised with the remote source.
    pub synchronized_at: Option<DateTime<Utc>>,
}

impl LocalTask {
    /// Creates a fresh local task holding no field values.
    #[must_use]
    pub const fn new(task_key: TaskKey) -> Self {
        Self {
            task_key,
            summary: None,
            description: None,
            status: None,
            reporter: None,
            owner: None,
            labels: Vec::new(),
            milestone: None,
            created_at: None,
            modified_at: None,
            comments: Vec::new(),
            synchronized_at: None,
        }
    }
}
