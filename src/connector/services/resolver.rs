//! Connection resolution and caching.

use crate::connector::{
    domain::{ConfigKey, Connection, ProjectId, RepositoryConfig},
    ports::{IssueClient, IssueTransport, TransportError, TransportResult},
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised while establishing a connection.
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    /// Authentication or project lookup failed.
    #[error("connection to {key} failed: {source}")]
    Handshake {
        /// Configuration the handshake was attempted for.
        key: ConfigKey,
        /// Transport failure.
        source: TransportError,
    },

    /// Validation failed; the cause is flattened into a message.
    #[error("connection not successful or repository not found: {0}")]
    Unreachable(String),
}

/// Result type for connection resolution.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

type ConnectionSlot<C> = Arc<Mutex<Option<Connection<C>>>>;

/// Produces and caches validated connections, one per repository
/// configuration.
///
/// Each configuration identity owns a slot guarded by its own async mutex: a
/// caller resolving a configuration whose handshake is in flight waits for
/// that handshake and reuses its result instead of starting a second one.
pub struct ConnectionResolver<T>
where
    T: IssueTransport,
{
    transport: Arc<T>,
    slots: Mutex<HashMap<ConfigKey, ConnectionSlot<T::Client>>>,
}

impl<T> ConnectionResolver<T>
where
    T: IssueTransport,
{
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            slots: Mutex::new(HashMap::new()),
        }
    }

    async fn slot(&self, key: &ConfigKey) -> ConnectionSlot<T::Client> {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Forgets `key` while its map entry still points at `slot`.
    async fn evict(&self, key: &ConfigKey, slot: &ConnectionSlot<T::Client>) {
        let mut slots = self.slots.lock().await;
        if slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            slots.remove(key);
        }
    }

    async fn handshake(
        &self,
        config: &RepositoryConfig,
        key: ConfigKey,
    ) -> TransportResult<Connection<T::Client>> {
        let client = self.transport.authenticate(config).await?;
        let project_id = client.lookup_project(config.project()).await?;
        Ok(Connection::new(key, Arc::new(client), project_id))
    }

    /// Returns the cached connection for `config`, performing a handshake on
    /// a cache miss or when `force_refresh` is set.
    ///
    /// A failed handshake drops any cached connection for the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Handshake`] when authentication or project
    /// lookup fails.
    pub async fn resolve(
        &self,
        config: &RepositoryConfig,
        force_refresh: bool,
    ) -> ConnectionResult<Connection<T::Client>> {
        let key = config.key();
        let slot = self.slot(&key).await;
        let mut cached = slot.lock().await;
        if !force_refresh && let Some(connection) = cached.as_ref() {
            tracing::debug!(repository = %key, "connection cache hit");
            return Ok(connection.clone());
        }

        tracing::debug!(repository = %key, force_refresh, "performing connection handshake");
        match self.handshake(config, key.clone()).await {
            Ok(connection) => {
                tracing::info!(
                    repository = %key,
                    project_id = %connection.project_id(),
                    "connection established"
                );
                *cached = Some(connection.clone());
                Ok(connection)
            }
            Err(source) => {
                tracing::warn!(repository = %key, error = %source, "connection handshake failed");
                *cached = None;
                self.evict(&key, &slot).await;
                Err(ConnectionError::Handshake { key, source })
            }
        }
    }

    /// Confirms that `config` reaches an existing project.
    ///
    /// Does not read or write the connection cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Unreachable`] for any failure.
    pub async fn validate(&self, config: &RepositoryConfig) -> ConnectionResult<ProjectId> {
        self.handshake(config, config.key())
            .await
            .map(|connection| connection.project_id())
            .map_err(|err| ConnectionError::Unreachable(err.to_string()))
    }

    /// Drops the cached connection for `config` and forgets the
    /// configuration.
    ///
    /// Waits for an in-flight handshake on the same configuration to finish
    /// before clearing it.
    pub async fn invalidate(&self, config: &RepositoryConfig) {
        let key = config.key();
        let slot = self.slots.lock().await.get(&key).map(Arc::clone);
        if let Some(existing) = slot {
            let mut cached = existing.lock().await;
            *cached = None;
            self.evict(&key, &existing).await;
            drop(cached);
            tracing::debug!(repository = %key, "connection invalidated");
        }
    }

    /// Drops `connection` from the cache unless it has already been replaced.
    ///
    /// A connection re-established by a concurrent refresh is kept.
    pub async fn invalidate_connection(&self, connection: &Connection<T::Client>) {
        let key = connection.key();
        let slot = self.slots.lock().await.get(key).map(Arc::clone);
        let Some(existing) = slot else {
            return;
        };
        let mut cached = existing.lock().await;
        if !cached
            .as_ref()
            .is_some_and(|current| current.same_client(connection))
        {
            tracing::debug!(repository = %key, "connection already replaced");
            return;
        }
        *cached = None;
        self.evict(key, &existing).await;
        drop(cached);
        tracing::debug!(repository = %key, "connection invalidated");
    }

    /// Returns `true` when a connection for `config` is cached.
    pub async fn is_cached(&self, config: &RepositoryConfig) -> bool {
        let slot = self.slots.lock().await.get(&config.key()).map(Arc::clone);
        match slot {
            Some(existing) => existing.lock().await.is_some(),
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) async fn tracked_configurations(&self) -> usize {
        self.slots.lock().await.len()
    }
}
