//! Replaying adapter for the `FileSystem` port.

use std::path::Path;

use super::{next_output, replay_result, SharedReplayer};
use crate::cassette::format::ports;
use crate::ports::FileSystem;

/// Serves recorded write results without touching the disk.
pub struct ReplayingFileSystem {
    replayer: Option<SharedReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a filesystem backed by `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a filesystem with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(self.replayer.as_ref(), ports::FS, "write");
        replay_result::<(), String>(output, "fs::write").map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replays_write_failure() {
        let fs = ReplayingFileSystem::new(replayer(vec![
            ("fs", "write", json!({"Ok": null})),
            ("fs", "write", json!({"Err": "disk full"})),
        ]));
        assert!(fs.write(Path::new("secret.txt"), "x").is_ok());
        let err = fs.write(Path::new("lootlabs_links.json"), "{}").unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
