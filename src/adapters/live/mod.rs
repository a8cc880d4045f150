//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod locker;
pub mod repository;
pub mod snippets;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// User agent sent with every request; GitHub rejects requests without one.
pub(crate) const USER_AGENT: &str = concat!("gistlock/", env!("CARGO_PKG_VERSION"));

/// Sends `request`, turning transport failures and non-success statuses into
/// [`HttpError`].
///
/// The request URL is stripped from transport errors since it may carry a
/// token in its query string.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, HttpError> {
    let response =
        request.send().await.map_err(|e| HttpError::Transport(e.without_url().to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(HttpError::Status { status: status.as_u16(), body })
}

/// Reads the body and decodes it as JSON into `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, HttpError> {
    let text = response
        .text()
        .await
        .map_err(|e| {
            HttpError::Transport(format!("failed to read {context} response: {}", e.without_url()))
        })?;
    serde_json::from_str(&text)
        .map_err(|e| HttpError::Malformed(format!("failed to parse {context} response: {e}")))
}
