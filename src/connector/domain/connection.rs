//! Validated client handles and the connector descriptor.

use super::{ConfigKey, ProjectId};
use std::fmt;
use std::sync::Arc;

/// Client handle bound to one remote project.
///
/// Produced by a successful handshake and shared by every query that runs
/// against the same repository configuration.
pub struct Connection<C> {
    key: ConfigKey,
    client: Arc<C>,
    project_id: ProjectId,
}

impl<C> Connection<C> {
    /// Creates a connection from a handshake result.
    #[must_use]
    pub const fn new(key: ConfigKey, client: Arc<C>, project_id: ProjectId) -> Self {
        Self {
            key,
            client,
            project_id,
        }
    }

    /// Returns the configuration identity this connection belongs to.
    #[must_use]
    pub const fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// Returns the client handle.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the resolved project id.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns `true` when both connections share the same client handle.
    #[must_use]
    pub fn same_client(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.client, &other.client)
    }
}

impl<C> Clone for Connection<C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            client: Arc::clone(&self.client),
            project_id: self.project_id,
        }
    }
}

impl<C> fmt::Debug for Connection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("key", &self.key)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

/// Static description of the connector as shown by the hosting framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorInfo {
    /// Connector kind identifier.
    pub kind: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Whether new tasks can be created through the connector.
    pub can_create_new_task: bool,
    /// Whether a task can be created from a bare task key.
    pub can_create_task_from_key: bool,
}

impl ConnectorInfo {
    /// Descriptor of the GitLab issues connector.
    pub const GITLAB: Self = Self {
        kind: "gitlab",
        label: "Gitlab issues",
        can_create_new_task: true,
        can_create_task_from_key: false,
    };
}
