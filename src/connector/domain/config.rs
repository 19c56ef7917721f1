//! Repository configuration supplied by the hosting task framework.

use super::ConnectorDomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Connection settings for one remote project.
///
/// The hosting framework owns these values; the connector only reads them.
/// Trailing slashes are stripped from the base URL and all values are
/// trimmed so that equivalent configurations share one [`ConfigKey`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRepositoryConfig")]
pub struct RepositoryConfig {
    base_url: String,
    token: String,
    project: String,
}

#[derive(Deserialize)]
struct RawRepositoryConfig {
    base_url: String,
    token: String,
    project: String,
}

impl TryFrom<RawRepositoryConfig> for RepositoryConfig {
    type Error = ConnectorDomainError;

    fn try_from(raw: RawRepositoryConfig) -> Result<Self, Self::Error> {
        Self::new(raw.base_url, raw.token, raw.project)
    }
}

impl RepositoryConfig {
    /// Creates a validated repository configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError`] when the base URL is empty or lacks an
    /// `http://`/`https://` prefix, or when the token or project is blank.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        project: impl Into<String>,
    ) -> Result<Self, ConnectorDomainError> {
        let raw_url = base_url.into();
        let normalized_url = raw_url.trim().trim_end_matches('/');
        if normalized_url.is_empty() {
            return Err(ConnectorDomainError::EmptyBaseUrl);
        }
        let has_valid_prefix =
            normalized_url.starts_with("http://") || normalized_url.starts_with("https://");
        if !has_valid_prefix {
            return Err(ConnectorDomainError::InvalidBaseUrl(normalized_url.to_owned()));
        }

        let raw_token = token.into();
        let normalized_token = raw_token.trim();
        if normalized_token.is_empty() {
            return Err(ConnectorDomainError::EmptyToken);
        }

        let raw_project = project.into();
        let normalized_project = raw_project.trim().trim_matches('/');
        if normalized_project.is_empty() {
            return Err(ConnectorDomainError::EmptyProject);
        }

        Ok(Self {
            base_url: normalized_url.to_owned(),
            token: normalized_token.to_owned(),
            project: normalized_project.to_owned(),
        })
    }

    /// Returns the normalised base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the access token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the project identifier, for example `group/project`.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the cache identity of this configuration.
    #[must_use]
    pub fn key(&self) -> ConfigKey {
        let digest = Sha256::digest(self.token.as_bytes());
        ConfigKey {
            base_url: self.base_url.clone(),
            project: self.project.clone(),
            token_digest: format!("{digest:x}"),
        }
    }
}

impl fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("project", &self.project)
            .finish()
    }
}

/// Identity of a [`RepositoryConfig`] used to key cached connections.
///
/// The token participates only as a SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    base_url: String,
    project: String,
    token_digest: String,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_url, self.project)
    }
}
