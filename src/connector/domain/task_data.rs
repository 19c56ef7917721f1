//! Neutral task-data record exchanged with the hosting task framework.

use super::{IssueState, TaskKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value of an optional remote field.
///
/// `Unset` means the remote source has no value ("no assignee"), which is
/// distinct from `Set(String::new())` ("assignee with an empty name").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum FieldValue<T> {
    /// The remote source carries no value.
    Unset,
    /// The remote source carries a value.
    Set(T),
}

impl<T> FieldValue<T> {
    /// Returns the value as an `Option` reference.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for FieldValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}

/// Tracker-neutral task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work item is open.
    Open,
    /// Work item is closed.
    Closed,
}

impl From<IssueState> for TaskStatus {
    fn from(value: IssueState) -> Self {
        if value.is_open() {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

/// Comment carried by complete task data, in remote order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    /// Comment author, when known.
    pub author: Option<String>,
    /// Comment text.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Partial or complete mirror of a remote issue.
///
/// Every field is optional at this level: `None` means the record does not
/// carry the field. Partial records carry only the change fingerprint
/// (summary, status, owner and modification date); complete records carry
/// everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskData {
    task_key: TaskKey,
    partial: bool,
    summary: Option<String>,
    description: Option<FieldValue<String>>,
    status: Option<TaskStatus>,
    reporter: Option<FieldValue<String>>,
    owner: Option<FieldValue<String>>,
    labels: Option<Vec<String>>,
    milestone: Option<FieldValue<String>>,
    created_at: Option<DateTime<Utc>>,
    modified_at: Option<DateTime<Utc>>,
    comments: Option<Vec<TaskComment>>,
}

impl TaskData {
    /// Creates an empty record for a task.
    #[must_use]
    pub const fn new(task_key: TaskKey, partial: bool) -> Self {
        Self {
            task_key,
            partial,
            summary: None,
            description: None,
            status: None,
            reporter: None,
            owner: None,
            labels: None,
            milestone: None,
            created_at: None,
            modified_at: None,
            comments: None,
        }
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: FieldValue<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: FieldValue<String>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Sets the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: FieldValue<String>) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }

    /// Sets the milestone.
    #[must_use]
    pub fn with_milestone(mut self, milestone: FieldValue<String>) -> Self {
        self.milestone = Some(milestone);
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the modification timestamp.
    #[must_use]
    pub const fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = TaskComment>) -> Self {
        self.comments = Some(comments.into_iter().collect());
        self
    }

    /// Returns the task key.
    #[must_use]
    pub const fn task_key(&self) -> &TaskKey {
        &self.task_key
    }

    /// Returns `true` for summary-only records.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.partial
    }

    /// Returns the summary, when carried.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns the description, when carried.
    #[must_use]
    pub const fn description(&self) -> Option<&FieldValue<String>> {
        self.description.as_ref()
    }

    /// Returns the status, when carried.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the reporter, when carried.
    #[must_use]
    pub const fn reporter(&self) -> Option<&FieldValue<String>> {
        self.reporter.as_ref()
    }

    /// Returns the owner, when carried.
    #[must_use]
    pub const fn owner(&self) -> Option<&FieldValue<String>> {
        self.owner.as_ref()
    }

    /// Returns the labels, when carried.
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Returns the milestone, when carried.
    #[must_use]
    pub const fn milestone(&self) -> Option<&FieldValue<String>> {
        self.milestone.as_ref()
    }

    /// Returns the creation timestamp, when carried.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the modification timestamp, when carried.
    #[must_use]
    pub const fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    /// Returns the comments, when carried.
    #[must_use]
    pub fn comments(&self) -> Option<&[TaskComment]> {
        self.comments.as_deref()
    }
}
