//! Latest-revision lookup for a gist.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GithubConfig;
use crate::context::ServiceContext;
use crate::error::RevisionNotFound;

/// Opaque token naming one historical revision of a gist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the newest revision of `gist_id`.
///
/// The gist API orders `history` newest first, so entry 0 is taken. One
/// request, no retries.
///
/// # Errors
///
/// Returns [`RevisionNotFound`] when the request fails, the history is
/// absent or empty, or the newest entry has an empty version.
pub async fn latest_revision(
    ctx: &ServiceContext,
    github: &GithubConfig,
    gist_id: &str,
) -> Result<RevisionId, RevisionNotFound> {
    let gist = ctx
        .snippets
        .fetch_gist(github, gist_id)
        .await
        .map_err(RevisionNotFound::Unavailable)?;

    let history = gist.history.ok_or(RevisionNotFound::MissingHistory)?;
    let newest = history.into_iter().next().ok_or(RevisionNotFound::EmptyHistory)?;
    if newest.version.trim().is_empty() {
        return Err(RevisionNotFound::EmptyVersion);
    }
    tracing::debug!(gist_id, revision = %newest.version, "resolved latest gist revision");
    Ok(RevisionId(newest.version))
}
