//! Identifier types for remote projects, issues and local tasks.

use super::{ConnectorDomainError, MappingError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric project identifier resolved during the connection handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    /// Creates a validated project identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::InvalidProjectId`] when the value is
    /// zero.
    pub const fn new(value: u64) -> Result<Self, ConnectorDomainError> {
        if value == 0 {
            return Err(ConnectorDomainError::InvalidProjectId(value));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project-scoped issue number as shown in the remote tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(u64);

impl IssueId {
    /// Creates a validated issue identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidIssueId`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, MappingError> {
        if value == 0 {
            return Err(MappingError::InvalidIssueId(value));
        }
        Ok(Self(value))
    }

    /// Parses the textual task identifier used by the local task store.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidTaskKey`] when the value is not a
    /// positive integer.
    pub fn parse(value: &str) -> Result<Self, MappingError> {
        let invalid = || MappingError::InvalidTaskKey(value.to_owned());
        let number = value.trim().parse::<u64>().map_err(|_| invalid())?;
        Self::new(number).map_err(|_| invalid())
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a local task: the textual form of its remote issue id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskKey(String);

impl TaskKey {
    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the key back into the remote issue identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidTaskKey`] when the key is not numeric.
    pub fn issue_id(&self) -> Result<IssueId, MappingError> {
        IssueId::parse(&self.0)
    }
}

impl From<IssueId> for TaskKey {
    fn from(value: IssueId) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for TaskKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
