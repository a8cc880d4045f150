//! Live adapter for the `LinkLocker` port using the LootLabs creator API.

use reqwest::Client;
use serde::Serialize;

use super::{read_json, send, USER_AGENT};
use crate::config::LockerConfig;
use crate::ports::locker::{EncryptMethod, LinkLocker, LinkRequest};
use crate::ports::HttpFuture;

/// Calls the LootLabs content locker and URL encryptor endpoints.
pub struct LiveLinkLocker {
    client: Client,
}

impl LiveLinkLocker {
    /// Creates an adapter sharing the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct EncryptBody<'a> {
    destination_url: &'a str,
}

impl LinkLocker for LiveLinkLocker {
    fn create_content_locker<'a>(
        &'a self,
        locker: &'a LockerConfig,
        request: &'a LinkRequest,
    ) -> HttpFuture<'a, serde_json::Value> {
        Box::pin(async move {
            let builder = self
                .client
                .post(&locker.content_locker_url)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
                .bearer_auth(&locker.api_token)
                .json(request);
            let response = send(builder).await?;
            read_json(response, "content locker").await
        })
    }

    fn encrypt_url<'a>(
        &'a self,
        locker: &'a LockerConfig,
        destination_url: &'a str,
        method: EncryptMethod,
    ) -> HttpFuture<'a, serde_json::Value> {
        Box::pin(async move {
            let builder = match method {
                EncryptMethod::Query => self.client.get(&locker.url_encryptor_url).query(&[
                    ("destination_url", destination_url),
                    ("api_token", locker.api_token.as_str()),
                ]),
                EncryptMethod::Bearer => self
                    .client
                    .post(&locker.url_encryptor_url)
                    .bearer_auth(&locker.api_token)
                    .json(&EncryptBody { destination_url }),
            }
            .header(reqwest::header::USER_AGENT, USER_AGENT);
            let response = send(builder).await?;
            read_json(response, "url encryptor").await
        })
    }
}
