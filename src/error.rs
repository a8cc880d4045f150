//! Error types shared across ports and pipeline stages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single HTTP call against one of the remote capabilities.
///
/// Serializable so that recorded cassettes can reproduce failures exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum HttpError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },
    /// The body could not be decoded into the expected shape.
    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl HttpError {
    /// Returns `true` when the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Why no revision could be obtained for a gist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevisionNotFound {
    /// The history request itself failed.
    #[error("gist lookup failed: {0}")]
    Unavailable(HttpError),
    /// The gist document carried no `history` field.
    #[error("gist has no history field")]
    MissingHistory,
    /// The history was present but empty.
    #[error("gist history is empty")]
    EmptyHistory,
    /// The newest history entry carried an empty version.
    #[error("newest gist revision has an empty version")]
    EmptyVersion,
}

/// The tracked repository file could neither be updated nor created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not create {path}: {source}")]
pub struct SyncError {
    /// Repository path of the tracked file.
    pub path: String,
    /// Error returned by the create call.
    #[source]
    pub source: HttpError,
}

/// Failure to obtain an encrypted destination from the locker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptError {
    /// The encryption request failed at the HTTP level.
    #[error("encryption request failed: {0}")]
    Request(#[from] HttpError),
    /// The locker answered but did not return an encrypted payload.
    #[error("encryption failed: {0}")]
    Rejected(String),
    /// The base link is not a recognized locker URL.
    #[error("invalid LootLabs URL format: {0}")]
    InvalidLockerUrl(String),
}

/// Failure writing an output artifact.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The artifact could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The link record could not be serialized.
    #[error("failed to serialize link record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// An override could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Invalid {
        /// Environment key holding the value.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The destination template lacks the revision placeholder.
    #[error("destination template must contain {{revision}}: {0}")]
    Template(String),
}

/// Fatal failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The tracked repository file could not be written.
    #[error(transparent)]
    Sync(#[from] SyncError),
    /// The output artifacts could not be written.
    #[error(transparent)]
    Persist(#[from] PersistError),
}
