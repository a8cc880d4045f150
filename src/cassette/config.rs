//! Per-port cassette selection for composable replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a path are left unconfigured
/// and panic if the pipeline calls them during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the clock port.
    pub clock: Option<PathBuf>,
    /// Cassette for the filesystem port.
    pub fs: Option<PathBuf>,
    /// Cassette for the gist history port.
    pub snippets: Option<PathBuf>,
    /// Cassette for the repository contents port.
    pub repo: Option<PathBuf>,
    /// Cassette for the link locker port.
    pub locker: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the gist history port.
    pub snippets: Option<CassetteReplayer>,
    /// Replayer for the repository contents port.
    pub repo: Option<CassetteReplayer>,
    /// Replayer for the link locker port.
    pub locker: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Points every port at `<dir>/<port>.cassette.yaml` when that file exists,
    /// which is the layout a recording session writes.
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.exists().then_some(path)
        };
        Self {
            clock: existing("clock"),
            fs: existing("fs"),
            snippets: existing("snippets"),
            repo: existing("repo"),
            locker: existing("locker"),
        }
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| -> Result<Option<CassetteReplayer>, String> {
            path.as_deref().map(|p| Cassette::load(p).map(|c| CassetteReplayer::new(&c))).transpose()
        };
        Ok(PortReplayers {
            clock: load(&self.clock)?,
            fs: load(&self.fs)?,
            snippets: load(&self.snippets)?,
            repo: load(&self.repo)?,
            locker: load(&self.locker)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn session_dir_picks_up_only_existing_cassettes() {
        let dir = std::env::temp_dir().join("gistlock_cassette_config_dir");
        std::fs::create_dir_all(&dir).unwrap();
        let mut rec = CassetteRecorder::new(dir.join("snippets.cassette.yaml"), "s", "abc");
        rec.record("snippets", "fetch_gist", json!({}), json!({"Ok": {"history": []}}));
        rec.finish().unwrap();

        let config = CassetteConfig::from_session_dir(&dir);
        assert!(config.snippets.is_some());
        assert!(config.locker.is_none());
        assert!(config.clock.is_none());

        let replayers = config.load_all().unwrap();
        assert!(replayers.snippets.is_some());
        assert!(replayers.repo.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_all_reports_unreadable_cassette() {
        let config = CassetteConfig {
            repo: Some(PathBuf::from("/nonexistent/repo.cassette.yaml")),
            ..CassetteConfig::default()
        };
        let err = config.load_all().err().unwrap();
        assert!(err.contains("repo.cassette.yaml"));
    }
}
