//! Repository hosting port: read, create and update a single file.

use serde::{Deserialize, Serialize};

use super::HttpFuture;
use crate::config::GithubConfig;

/// Current state of a file in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFile {
    /// Path inside the repository.
    pub path: String,
    /// Decoded file content.
    pub content: String,
    /// Blob hash required by updates for optimistic concurrency.
    pub sha: String,
}

/// File operations against the repository named in [`GithubConfig`].
pub trait RepositoryHost: Send + Sync {
    /// Reads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::HttpError::Status`] with 404 when the file does
    /// not exist, or another error on any other failure.
    fn get_file<'a>(&'a self, github: &'a GithubConfig, path: &'a str) -> HttpFuture<'a, RepoFile>;

    /// Replaces the file at `path`, whose current blob hash is `sha`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the request fails.
    fn update_file<'a>(
        &'a self,
        github: &'a GithubConfig,
        path: &'a str,
        message: &'a str,
        content: &'a str,
        sha: &'a str,
    ) -> HttpFuture<'a, ()>;

    /// Creates a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or the request fails.
    fn create_file<'a>(
        &'a self,
        github: &'a GithubConfig,
        path: &'a str,
        message: &'a str,
        content: &'a str,
    ) -> HttpFuture<'a, ()>;
}
