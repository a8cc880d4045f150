//! Recording adapter for the `LinkLocker` port.

use serde_json::json;

use super::record_result;
use crate::cassette::format::ports;
use crate::cassette::session::SharedRecorder;
use crate::config::LockerConfig;
use crate::ports::{EncryptMethod, HttpFuture, LinkLocker, LinkRequest};

/// Records locker calls while delegating to an inner locker.
pub struct RecordingLinkLocker {
    inner: Box<dyn LinkLocker>,
    recorder: SharedRecorder,
}

impl RecordingLinkLocker {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn LinkLocker>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl LinkLocker for RecordingLinkLocker {
    fn create_content_locker<'a>(
        &'a self,
        locker: &'a LockerConfig,
        request: &'a LinkRequest,
    ) -> HttpFuture<'a, serde_json::Value> {
        Box::pin(async move {
            let result = self.inner.create_content_locker(locker, request).await;
            record_result(&self.recorder, ports::LOCKER, "create_content_locker", request, &result);
            result
        })
    }

    fn encrypt_url<'a>(
        &'a self,
        locker: &'a LockerConfig,
        destination_url: &'a str,
        method: EncryptMethod,
    ) -> HttpFuture<'a, serde_json::Value> {
        Box::pin(async move {
            let result = self.inner.encrypt_url(locker, destination_url, method).await;
            record_result(
                &self.recorder,
                ports::LOCKER,
                "encrypt_url",
                &json!({"destination_url": destination_url, "method": method}),
                &result,
            );
            result
        })
    }
}
