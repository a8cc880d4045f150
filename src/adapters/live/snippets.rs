//! Live adapter for the `SnippetHost` port using the GitHub gists API.

use reqwest::Client;

use super::{read_json, send, USER_AGENT};
use crate::config::GithubConfig;
use crate::ports::snippets::{Gist, SnippetHost};
use crate::ports::HttpFuture;

/// Reads gists through `GET /gists/{id}`.
pub struct LiveSnippetHost {
    client: Client,
}

impl LiveSnippetHost {
    /// Creates an adapter sharing the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl SnippetHost for LiveSnippetHost {
    fn fetch_gist<'a>(&'a self, github: &'a GithubConfig, gist_id: &'a str) -> HttpFuture<'a, Gist> {
        Box::pin(async move {
            let url = format!("{}/gists/{gist_id}", github.api_base);
            let request = self
                .client
                .get(&url)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
                .header(reqwest::header::ACCEPT, "application/vnd.github+json")
                .bearer_auth(&github.token);
            let response = send(request).await?;
            read_json(response, "gist").await
        })
    }
}
