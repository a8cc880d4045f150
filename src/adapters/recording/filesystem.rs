//! Recording adapter for the `FileSystem` port.

use std::path::Path;

use serde_json::json;

use super::record_result;
use crate::cassette::format::ports;
use crate::cassette::session::SharedRecorder;
use crate::ports::FileSystem;

/// Records artifact writes while delegating to an inner filesystem.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl FileSystem for RecordingFileSystem {
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let recorded = result.as_ref().map_err(ToString::to_string);
        record_result(
            &self.recorder,
            ports::FS,
            "write",
            &json!({"path": path, "contents": contents}),
            &recorded,
        );
        result
    }
}
