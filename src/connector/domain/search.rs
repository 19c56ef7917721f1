//! Evaluation of saved-search criteria against remote issues.

use super::{Criterion, Query, RemoteIssue, StatusFilter, TextField, TextMatch};

/// Issue filter for one saved search.
///
/// Pure: evaluating never touches the network and never mutates state.
#[derive(Debug, Clone, Copy)]
pub struct IssueSearch<'q> {
    query: &'q Query,
}

impl<'q> IssueSearch<'q> {
    /// Creates a filter for the given query.
    #[must_use]
    pub const fn new(query: &'q Query) -> Self {
        Self { query }
    }

    /// Returns `true` when every criterion of the query accepts the issue.
    #[must_use]
    pub fn matches(&self, issue: &RemoteIssue) -> bool {
        self.query
            .criteria()
            .iter()
            .all(|criterion| criterion.matches(issue))
    }
}

impl Criterion {
    /// Evaluates this criterion against one issue.
    ///
    /// [`Criterion::Unsupported`] always passes so that queries written for
    /// newer filter features never hide issues.
    #[must_use]
    pub fn matches(&self, issue: &RemoteIssue) -> bool {
        match self {
            Self::Status { status } => status_matches(*status, issue),
            Self::Text {
                field,
                pattern,
                mode,
            } => text_field_values(*field, issue)
                .into_iter()
                .flatten()
                .any(|candidate| text_matches(candidate, pattern, *mode)),
            Self::Label { name } => issue
                .labels()
                .iter()
                .any(|label| label.trim().eq_ignore_ascii_case(name.trim())),
            Self::Unsupported { .. } => true,
        }
    }
}

fn status_matches(status: StatusFilter, issue: &RemoteIssue) -> bool {
    match status {
        StatusFilter::Any => true,
        // An unknown remote state satisfies neither open nor closed.
        StatusFilter::Open => issue.parsed_state().is_ok_and(|state| state.is_open()),
        StatusFilter::Closed => issue.parsed_state().is_ok_and(|state| !state.is_open()),
    }
}

fn text_field_values(field: TextField, issue: &RemoteIssue) -> [Option<&str>; 2] {
    match field {
        TextField::Title => [Some(issue.title()), None],
        TextField::Description => [issue.description(), None],
        TextField::TitleOrDescription => [Some(issue.title()), issue.description()],
        TextField::Assignee => [issue.assignee(), None],
        TextField::Author => [issue.author(), None],
        TextField::Milestone => [issue.milestone(), None],
    }
}

fn text_matches(candidate: &str, pattern: &str, mode: TextMatch) -> bool {
    match mode {
        TextMatch::Exact => candidate == pattern,
        TextMatch::Contains => candidate
            .to_lowercase()
            .contains(pattern.to_lowercase().as_str()),
    }
}
