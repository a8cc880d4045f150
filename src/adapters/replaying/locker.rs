//! Replaying adapter for the `LinkLocker` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::cassette::format::ports;
use crate::config::LockerConfig;
use crate::ports::{EncryptMethod, HttpFuture, LinkLocker, LinkRequest};

/// Serves recorded locker responses.
pub struct ReplayingLinkLocker {
    replayer: Option<SharedReplayer>,
}

impl ReplayingLinkLocker {
    /// Creates a locker backed by `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a locker with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl LinkLocker for ReplayingLinkLocker {
    fn create_content_locker<'a>(
        &'a self,
        _locker: &'a LockerConfig,
        _request: &'a LinkRequest,
    ) -> HttpFuture<'a, serde_json::Value> {
        let output = next_output(self.replayer.as_ref(), ports::LOCKER, "create_content_locker");
        Box::pin(async move { replay_result(output, "locker::create_content_locker") })
    }

    fn encrypt_url<'a>(
        &'a self,
        _locker: &'a LockerConfig,
        _destination_url: &'a str,
        _method: EncryptMethod,
    ) -> HttpFuture<'a, serde_json::Value> {
        let output = next_output(self.replayer.as_ref(), ports::LOCKER, "encrypt_url");
        Box::pin(async move { replay_result(output, "locker::encrypt_url") })
    }
}
