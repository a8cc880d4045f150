//! Recording adapter for the `RepositoryHost` port.

use serde_json::json;

use super::record_result;
use crate::cassette::format::ports;
use crate::cassette::session::SharedRecorder;
use crate::config::GithubConfig;
use crate::ports::{HttpFuture, RepoFile, RepositoryHost};

/// Records repository file operations while delegating to an inner host.
pub struct RecordingRepositoryHost {
    inner: Box<dyn RepositoryHost>,
    recorder: SharedRecorder,
}

impl RecordingRepositoryHost {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn RepositoryHost>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

fn target(github: &GithubConfig, path: &str) -> serde_json::Value {
    json!({"owner": github.owner, "repo": github.repo, "path": path})
}

impl RepositoryHost for RecordingRepositoryHost {
    fn get_file<'a>(&'a self, github: &'a GithubConfig, path: &'a str) -> HttpFuture<'a, RepoFile> {
        Box::pin(async move {
            let result = self.inner.get_file(github, path).await;
            record_result(&self.recorder, ports::REPO, "get_file", &target(github, path), &result);
            result
        })
    }

    fn update_file<'a>(
        &'a self,
        github: &'a GithubConfig,
        path: &'a str,
        message: &'a str,
        content: &'a str,
        sha: &'a str,
    ) -> HttpFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.update_file(github, path, message, content, sha).await;
            let mut input = target(github, path);
            input["message"] = json!(message);
            input["content"] = json!(content);
            input["sha"] = json!(sha);
            record_result(&self.recorder, ports::REPO, "update_file", &input, &result);
            result
        })
    }

    fn create_file<'a>(
        &'a self,
        github: &'a GithubConfig,
        path: &'a str,
        message: &'a str,
        content: &'a str,
    ) -> HttpFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.create_file(github, path, message, content).await;
            let mut input = target(github, path);
            input["message"] = json!(message);
            input["content"] = json!(content);
            record_result(&self.recorder, ports::REPO, "create_file", &input, &result);
            result
        })
    }
}
