//! Error types for connector domain validation and issue mapping.

use thiserror::Error;

/// Errors returned while constructing connector domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorDomainError {
    /// The repository base URL is empty after trimming.
    #[error("repository base URL must not be empty")]
    EmptyBaseUrl,

    /// The repository base URL does not have an `http://` or `https://` prefix.
    #[error("repository base URL '{0}' must start with 'http://' or 'https://'")]
    InvalidBaseUrl(String),

    /// The access token is empty after trimming.
    #[error("access token must not be empty")]
    EmptyToken,

    /// The project identifier is empty after trimming.
    #[error("project identifier must not be empty")]
    EmptyProject,

    /// The project identifier is invalid.
    #[error("invalid project id {0}, expected a positive integer")]
    InvalidProjectId(u64),
}

/// Errors raised while mapping remote issue data onto task data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The remote issue id is not a positive integer.
    #[error("invalid issue id {0}, expected a positive integer")]
    InvalidIssueId(u64),

    /// A task key could not be parsed as an issue id.
    #[error("invalid task key '{0}', expected a positive integer")]
    InvalidTaskKey(String),

    /// The remote issue reported a state the connector does not know.
    #[error("issue #{issue} has unknown state '{state}'")]
    UnknownState {
        /// Issue identifier.
        issue: u64,
        /// Raw state string reported by the remote source.
        state: String,
    },

    /// The remote issue title is blank.
    #[error("issue #{0} has an empty title")]
    EmptyTitle(u64),
}

/// Error returned while parsing a remote issue state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue state: {0}")]
pub struct ParseIssueStateError(pub String);
