//! Link locker port: gated link creation and destination encryption.

use serde::{Deserialize, Serialize};

use super::HttpFuture;
use crate::config::LockerConfig;

/// Body of a content locker creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequest {
    /// Title shown on the locker page.
    pub title: String,
    /// Destination revealed once the tasks are done.
    pub url: String,
    /// Monetization tier.
    pub tier_id: u32,
    /// Number of tasks to complete.
    pub number_of_tasks: u32,
    /// Visual theme.
    pub theme: u32,
}

/// Transport used for the URL encryptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptMethod {
    /// GET with the token and destination as query parameters.
    Query,
    /// POST with a bearer header and a JSON body.
    #[default]
    Bearer,
}

impl EncryptMethod {
    /// The `type` discriminator the locker returns on success for this transport.
    #[must_use]
    pub fn success_type(self) -> &'static str {
        match self {
            Self::Query => "fetched",
            Self::Bearer => "created",
        }
    }
}

/// Raw access to the link locker API. Responses are returned undecoded.
pub trait LinkLocker: Send + Sync {
    /// Requests a gated link for `request.url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that is not JSON.
    fn create_content_locker<'a>(
        &'a self,
        locker: &'a LockerConfig,
        request: &'a LinkRequest,
    ) -> HttpFuture<'a, serde_json::Value>;

    /// Requests an encrypted form of `destination_url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that is not JSON.
    fn encrypt_url<'a>(
        &'a self,
        locker: &'a LockerConfig,
        destination_url: &'a str,
        method: EncryptMethod,
    ) -> HttpFuture<'a, serde_json::Value>;
}
