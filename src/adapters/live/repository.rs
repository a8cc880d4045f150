//! Live adapter for the `RepositoryHost` port using the GitHub contents API.
//!
//! Both creation and update are `PUT /repos/{owner}/{repo}/contents/{path}`;
//! an update carries the current blob `sha`. Content travels base64-encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{read_json, send, USER_AGENT};
use crate::config::GithubConfig;
use crate::error::HttpError;
use crate::ports::repository::{RepoFile, RepositoryHost};
use crate::ports::HttpFuture;

/// Talks to the GitHub repository contents endpoint.
pub struct LiveRepositoryHost {
    client: Client,
}

impl LiveRepositoryHost {
    /// Creates an adapter sharing the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn request(&self, method: reqwest::Method, github: &GithubConfig, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            github.api_base,
            github.owner,
            github.repo,
            path.trim_start_matches('/')
        );
        self.client
            .request(method, url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .bearer_auth(&github.token)
    }

    async fn put(
        &self,
        github: &GithubConfig,
        path: &str,
        body: &PutContents<'_>,
    ) -> Result<(), HttpError> {
        send(self.request(reqwest::Method::PUT, github, path).json(body)).await?;
        Ok(())
    }
}

/// Subset of the contents API file object.
#[derive(Deserialize)]
struct ContentsResponse {
    path: String,
    sha: String,
    #[serde(default)]
    content: String,
}

/// Body of a create or update call.
#[derive(Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Decodes the base64 payload GitHub wraps at 60 columns.
fn decode_content(encoded: &str) -> Result<String, HttpError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| HttpError::Malformed(format!("file content is not base64: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl RepositoryHost for LiveRepositoryHost {
    fn get_file<'a>(&'a self, github: &'a GithubConfig, path: &'a str) -> HttpFuture<'a, RepoFile> {
        Box::pin(async move {
            let response = send(self.request(reqwest::Method::GET, github, path)).await?;
            let file: ContentsResponse = read_json(response, "contents").await?;
            Ok(RepoFile { path: file.path, content: decode_content(&file.content)?, sha: file.sha })
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
            let body = PutContents { message, content: STANDARD.encode(content), sha: Some(sha) };
            self.put(github, path, &body).await
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
            let body = PutContents { message, content: STANDARD.encode(content), sha: None };
            self.put(github, path, &body).await
        })
    }
}
