//! Recording session managing one cassette recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::format::ports;
use super::recorder::CassetteRecorder;

/// Shared handle to a port's recorder, held by its recording adapter.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Per-port recorders writing into one timestamped directory.
pub struct RecordingSession {
    /// Recorder for clock interactions.
    pub clock: SharedRecorder,
    /// Recorder for filesystem interactions.
    pub fs: SharedRecorder,
    /// Recorder for gist history interactions.
    pub snippets: SharedRecorder,
    /// Recorder for repository interactions.
    pub repo: SharedRecorder,
    /// Recorder for link locker interactions.
    pub locker: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates `<root>/<timestamp>/` and a recorder per port inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = get_commit_hash();
        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"), &commit)))
        };

        Ok(Self {
            clock: make_recorder(ports::CLOCK),
            fs: make_recorder(ports::FS),
            snippets: make_recorder(ports::SNIPPETS),
            repo: make_recorder(ports::REPO),
            locker: make_recorder(ports::LOCKER),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every port's cassette file and returns the session directory.
    ///
    /// The context holding the recording adapters must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a file cannot
    /// be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            if recorder.is_empty() {
                tracing::debug!(port, "port was not called, writing empty cassette");
            } else {
                tracing::debug!(port, interactions = recorder.len(), "writing cassette");
            }
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.clock, ports::CLOCK)?;
        finish_one(self.fs, ports::FS)?;
        finish_one(self.snippets, ports::SNIPPETS)?;
        finish_one(self.repo, ports::REPO)?;
        finish_one(self.locker, ports::LOCKER)?;

        Ok(self.output_dir)
    }
}

/// Current git commit of the working directory, or "unknown".
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| {
            tracing::warn!("could not determine git commit hash, recording 'unknown'");
            "unknown".to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_writes_one_cassette_per_port() {
        let root = std::env::temp_dir().join("gistlock_session_test");
        let _ = std::fs::remove_dir_all(&root);

        let session = RecordingSession::new(&root).expect("session should start");
        let dir = session.output_dir().to_path_buf();
        assert!(dir.exists());

        let finished = session.finish().expect("finish should succeed");
        assert_eq!(finished, dir);
        for port in ports::ALL {
            assert!(dir.join(format!("{port}.cassette.yaml")).exists(), "missing {port}");
        }

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn finish_fails_while_an_adapter_holds_a_recorder() {
        let root = std::env::temp_dir().join("gistlock_session_busy_test");
        let _ = std::fs::remove_dir_all(&root);

        let session = RecordingSession::new(&root).unwrap();
        let held = Arc::clone(&session.locker);
        let err = session.finish().unwrap_err();
        assert!(err.contains("locker still has references"));
        drop(held);

        let _ = std::fs::remove_dir_all(&root);
    }
}
