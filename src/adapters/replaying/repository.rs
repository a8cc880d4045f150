//! Replaying adapter for the `RepositoryHost` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::cassette::format::ports;
use crate::config::GithubConfig;
use crate::ports::{HttpFuture, RepoFile, RepositoryHost};

/// Serves recorded repository file operations.
pub struct ReplayingRepositoryHost {
    replayer: Option<SharedReplayer>,
}

impl ReplayingRepositoryHost {
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

impl RepositoryHost for ReplayingRepositoryHost {
    fn get_file<'a>(&'a self, _github: &'a GithubConfig, _path: &'a str) -> HttpFuture<'a, RepoFile> {
        let output = next_output(self.replayer.as_ref(), ports::REPO, "get_file");
        Box::pin(async move { replay_result(output, "repo::get_file") })
    }

    fn update_file<'a>(
        &'a self,
        _github: &'a GithubConfig,
        _path: &'a str,
        _message: &'a str,
        _content: &'a str,
        _sha: &'a str,
    ) -> HttpFuture<'a, ()> {
        let output = next_output(self.replayer.as_ref(), ports::REPO, "update_file");
        Box::pin(async move { replay_result(output, "repo::update_file") })
    }

    fn create_file<'a>(
        &'a self,
        _github: &'a GithubConfig,
        _path: &'a str,
        _message: &'a str,
        _content: &'a str,
    ) -> HttpFuture<'a, ()> {
        let output = next_output(self.replayer.as_ref(), ports::REPO, "create_file");
        Box::pin(async move { replay_result(output, "repo::create_file") })
    }
}
