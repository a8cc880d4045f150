//! Result of link generation and the record persisted for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::revision::RevisionId;

/// Written to `secret.txt` when the locker answered without a usable link.
pub const FAILED_SENTINEL: &str = "FAILED_TO_GENERATE_LINK";
/// Written to `secret.txt` when the link request itself errored.
pub const ERROR_SENTINEL: &str = "ERROR_GENERATING_LINK";

/// How link generation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A response arrived but yielded no link.
    Rejected,
    /// The request failed before a response could be interpreted.
    Errored,
}

/// A failed link generation with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFailure {
    /// Failure class; selects the sentinel.
    pub kind: FailureKind,
    /// Why it failed.
    pub reason: String,
}

impl LinkFailure {
    /// A response that carried no usable link.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self { kind: FailureKind::Rejected, reason: reason.into() }
    }

    /// A request that errored.
    pub fn errored(reason: impl Into<String>) -> Self {
        Self { kind: FailureKind::Errored, reason: reason.into() }
    }

    /// The sentinel written in place of a link.
    #[must_use]
    pub fn sentinel(&self) -> &'static str {
        match self.kind {
            FailureKind::Rejected => FAILED_SENTINEL,
            FailureKind::Errored => ERROR_SENTINEL,
        }
    }
}

/// Outcome of link generation; both variants flow into persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A gated link was obtained.
    Generated(String),
    /// No link; a sentinel is written instead.
    Failed(LinkFailure),
}

impl LinkOutcome {
    /// The value written to the single-value artifact.
    #[must_use]
    pub fn artifact_value(&self) -> &str {
        match self {
            Self::Generated(url) => url,
            Self::Failed(failure) => failure.sentinel(),
        }
    }
}

/// The structured artifact, overwritten on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// When the record was produced.
    pub generated_at: DateTime<Utc>,
    /// The gated link, or the failure sentinel.
    pub loot_url: String,
    /// Destination URL the link points at.
    pub original_url: String,
    /// Revision interpolated into the destination.
    pub key: RevisionId,
    /// Anti-bypass variant of the link; the pipeline never composes one.
    pub anti_bypass_url: Option<String>,
    /// Failure reason, `None` on success.
    pub error: Option<String>,
}

impl LinkRecord {
    /// Builds the record for `outcome`.
    #[must_use]
    pub fn new(
        generated_at: DateTime<Utc>,
        outcome: &LinkOutcome,
        original_url: String,
        key: RevisionId,
    ) -> Self {
        let error = match outcome {
            LinkOutcome::Generated(_) => None,
            LinkOutcome::Failed(failure) => Some(failure.reason.clone()),
        };
        Self {
            generated_at,
            loot_url: outcome.artifact_value().to_string(),
            original_url,
            key,
            anti_bypass_url: None,
            error,
        }
    }
}
