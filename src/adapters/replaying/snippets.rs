//! Replaying adapter for the `SnippetHost` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::cassette::format::ports;
use crate::config::GithubConfig;
use crate::ports::{Gist, HttpFuture, SnippetHost};

/// Serves recorded gist documents.
pub struct ReplayingSnippetHost {
    replayer: Option<SharedReplayer>,
}

impl ReplayingSnippetHost {
    /// Creates a host backed by `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a host with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl SnippetHost for ReplayingSnippetHost {
    fn fetch_gist<'a>(&'a self, _github: &'a GithubConfig, _gist_id: &'a str) -> HttpFuture<'a, Gist> {
        let output = next_output(self.replayer.as_ref(), ports::SNIPPETS, "fetch_gist");
        Box::pin(async move { replay_result(output, "snippets::fetch_gist") })
    }
}
