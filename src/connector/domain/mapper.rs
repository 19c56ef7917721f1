//! Mapping between remote issues, task data and local tasks.

use super::{
    FieldValue, IssueId, LocalTask, MappingError, RemoteComment, RemoteIssue, TaskComment,
    TaskData, TaskKey, TaskStatus,
};

/// Bidirectional mapper between remote issues and local tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskMapper;

impl TaskMapper {
    /// Builds task data from a remote issue and its comments.
    ///
    /// Partial records carry only the change fingerprint and ignore
    /// `comments`. Missing optional remote fields become
    /// [`FieldValue::Unset`].
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the issue id is zero, the state is
    /// unknown, or the title is blank.
    pub fn to_task_data(
        issue: &RemoteIssue,
        comments: &[RemoteComment],
        partial: bool,
    ) -> Result<TaskData, MappingError> {
        let issue_id = IssueId::new(issue.id())?;
        let state = issue
            .parsed_state()
            .map_err(|err| MappingError::UnknownState {
                issue: issue.id(),
                state: err.0,
            })?;
        if issue.title().trim().is_empty() {
            return Err(MappingError::EmptyTitle(issue.id()));
        }

        let mut data = TaskData::new(TaskKey::from(issue_id), partial)
            .with_summary(issue.title())
            .with_status(TaskStatus::from(state))
            .with_owner(optional(issue.assignee()));
        if let Some(updated_at) = issue.updated_at() {
            data = data.with_modified_at(updated_at);
        }
        if partial {
            return Ok(data);
        }

        Ok(data
            .with_description(optional(issue.description()))
            .with_reporter(optional(issue.author()))
            .with_labels(issue.labels().iter().cloned())
            .with_milestone(optional(issue.milestone()))
            .with_created_at(issue.created_at())
            .with_comments(comments.iter().map(|comment| TaskComment {
                author: comment.author().map(str::to_owned),
                text: comment.body().to_owned(),
                created_at: comment.created_at(),
            })))
    }

    /// Writes the fields carried by `data` onto a local task.
    ///
    /// Fields the record does not carry are left untouched. A partial
    /// record's modification timestamp is only a fingerprint and is never
    /// written, so the task stays stale until complete data is applied.
    pub fn apply_to(data: &TaskData, task: &mut LocalTask) {
        if let Some(summary) = data.summary() {
            task.summary = Some(summary.to_owned());
        }
        if let Some(description) = data.description() {
            task.description = description.as_option().cloned();
        }
        if let Some(status) = data.status() {
            task.status = Some(status);
        }
        if let Some(reporter) = data.reporter() {
            task.reporter = reporter.as_option().cloned();
        }
        if let Some(owner) = data.owner() {
            task.owner = owner.as_option().cloned();
        }
        if let Some(labels) = data.labels() {
            task.labels = labels.to_vec();
        }
        if let Some(milestone) = data.milestone() {
            task.milestone = milestone.as_option().cloned();
        }
        if let Some(created_at) = data.created_at() {
            task.created_at = Some(created_at);
        }
        if !data.is_partial()
            && let Some(modified_at) = data.modified_at()
        {
            task.modified_at = Some(modified_at);
        }
        if let Some(comments) = data.comments() {
            task.comments = comments.to_vec();
        }
    }

    /// Decides whether a local task is stale relative to `data`.
    ///
    /// Partial records compare every carried field. Complete records compare
    /// the modification timestamp only; a record without one always counts
    /// as changed.
    #[must_use]
    pub fn has_changed(data: &TaskData, task: &LocalTask) -> bool {
        if data.is_partial() {
            return !carried_fields_match(data, task);
        }
        data.modified_at()
            .is_none_or(|remote| Some(remote) != task.modified_at)
    }
}

fn optional(value: Option<&str>) -> FieldValue<String> {
    FieldValue::from(value.map(str::to_owned))
}

fn carried_fields_match(data: &TaskData, task: &LocalTask) -> bool {
    let optional_matches = |carried: Option<&FieldValue<String>>, local: Option<&String>| {
        carried.is_none_or(|value| value.as_option() == local)
    };

    data.summary()
        .is_none_or(|summary| task.summary.as_deref() == Some(summary))
        && optional_matches(data.description(), task.description.as_ref())
        && data.status().is_none_or(|status| task.status == Some(status))
        && optional_matches(data.reporter(), task.reporter.as_ref())
        && optional_matches(data.owner(), task.owner.as_ref())
        && data.labels().is_none_or(|labels| labels == task.labels.as_slice())
        && optional_matches(data.milestone(), task.milestone.as_ref())
        && data.created_at().is_none_or(|created| task.created_at == Some(created))
        && data.modified_at().is_none_or(|modified| task.modified_at == Some(modified))
        && data.comments().is_none_or(|comments| comments == task.comments.as_slice())
}
