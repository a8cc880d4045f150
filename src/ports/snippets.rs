//! Snippet hosting port: revision history of a gist.

use serde::{Deserialize, Serialize};

use super::HttpFuture;
use crate::config::GithubConfig;

/// One entry of a gist's revision history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistRevision {
    /// Opaque revision token.
    pub version: String,
}

/// The part of a gist document the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gist {
    /// Revision history, newest first. `None` when the field is absent.
    #[serde(default)]
    pub history: Option<Vec<GistRevision>>,
}

/// Reads gist metadata from the snippet host.
pub trait SnippetHost: Send + Sync {
    /// Fetches the gist document for `gist_id`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    fn fetch_gist<'a>(&'a self, github: &'a GithubConfig, gist_id: &'a str) -> HttpFuture<'a, Gist>;
}
