//! Recording adapter for the `SnippetHost` port.

use serde_json::json;

use super::record_result;
use crate::cassette::format::ports;
use crate::cassette::session::SharedRecorder;
use crate::config::GithubConfig;
use crate::ports::{Gist, HttpFuture, SnippetHost};

/// Records gist lookups while delegating to an inner host.
pub struct RecordingSnippetHost {
    inner: Box<dyn SnippetHost>,
    recorder: SharedRecorder,
}

impl RecordingSnippetHost {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn SnippetHost>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl SnippetHost for RecordingSnippetHost {
    fn fetch_gist<'a>(&'a self, github: &'a GithubConfig, gist_id: &'a str) -> HttpFuture<'a, Gist> {
        Box::pin(async move {
            let result = self.inner.fetch_gist(github, gist_id).await;
            record_result(&self.recorder, ports::SNIPPETS, "fetch_gist", &json!({"gist_id": gist_id}), &result);
            result
        })
    }
}
