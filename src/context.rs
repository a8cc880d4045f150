//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingLinkLocker, ReplayingRepositoryHost,
    ReplayingSnippetHost,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{Clock, FileSystem, LinkLocker, RepositoryHost, SnippetHost};

/// Bundles all port trait objects into a single context.
///
/// Pipeline stages only ever see this struct, so the same code runs against
/// live services, a recording session, or a replayed cassette.
pub struct ServiceContext {
    /// Clock for the record timestamp.
    pub clock: Box<dyn Clock>,
    /// Filesystem for the output artifacts.
    pub fs: Box<dyn FileSystem>,
    /// Gist history lookups.
    pub snippets: Box<dyn SnippetHost>,
    /// Tracked repository file operations.
    pub repo: Box<dyn RepositoryHost>,
    /// Link locker calls.
    pub locker: Box<dyn LinkLocker>,
}

impl ServiceContext {
    /// Creates a live context: system clock, real disk, real HTTP.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::filesystem::LiveFileSystem;
        use crate::adapters::live::locker::LiveLinkLocker;
        use crate::adapters::live::repository::LiveRepositoryHost;
        use crate::adapters::live::snippets::LiveSnippetHost;

        let client = reqwest::Client::new();
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            snippets: Box::new(LiveSnippetHost::new(client.clone())),
            repo: Box::new(LiveRepositoryHost::new(client.clone())),
            locker: Box::new(LiveLinkLocker::new(client)),
        }
    }

    /// Creates a live context whose interactions are captured by a new
    /// recording session under `root`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(root: &Path) -> Result<(Self, RecordingSession), String> {
        use crate::adapters::recording::clock::RecordingClock;
        use crate::adapters::recording::filesystem::RecordingFileSystem;
        use crate::adapters::recording::locker::RecordingLinkLocker;
        use crate::adapters::recording::repository::RecordingRepositoryHost;
        use crate::adapters::recording::snippets::RecordingSnippetHost;

        let session = RecordingSession::new(root)?;
        let live = Self::live();
        let ctx = Self {
            clock: Box::new(RecordingClock::new(live.clock, Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(live.fs, Arc::clone(&session.fs))),
            snippets: Box::new(RecordingSnippetHost::new(
                live.snippets,
                Arc::clone(&session.snippets),
            )),
            repo: Box::new(RecordingRepositoryHost::new(live.repo, Arc::clone(&session.repo))),
            locker: Box::new(RecordingLinkLocker::new(live.locker, Arc::clone(&session.locker))),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from one in-memory cassette.
    ///
    /// Every port shares the cassette; cursors advance per port/method pair.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(cassette)));
        Self {
            clock: Box::new(ReplayingClock::new(Arc::clone(&replayer))),
            fs: Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
            snippets: Box::new(ReplayingSnippetHost::new(Arc::clone(&replayer))),
            repo: Box::new(ReplayingRepositoryHost::new(Arc::clone(&replayer))),
            locker: Box::new(ReplayingLinkLocker::new(replayer)),
        }
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::from_cassette(&Cassette::load(path)?))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message when
    /// called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        let shared = |r: CassetteReplayer| Arc::new(Mutex::new(r));

        Ok(Self {
            clock: Box::new(
                replayers.clock.map(shared).map_or_else(ReplayingClock::unconfigured, ReplayingClock::new),
            ),
            fs: Box::new(
                replayers
                    .fs
                    .map(shared)
                    .map_or_else(ReplayingFileSystem::unconfigured, ReplayingFileSystem::new),
            ),
            snippets: Box::new(
                replayers
                    .snippets
                    .map(shared)
                    .map_or_else(ReplayingSnippetHost::unconfigured, ReplayingSnippetHost::new),
            ),
            repo: Box::new(
                replayers
                    .repo
                    .map(shared)
                    .map_or_else(ReplayingRepositoryHost::unconfigured, ReplayingRepositoryHost::new),
            ),
            locker: Box::new(
                replayers
                    .locker
                    .map(shared)
                    .map_or_else(ReplayingLinkLocker::unconfigured, ReplayingLinkLocker::new),
            ),
        })
    }

    /// Replaces the filesystem port.
    #[must_use]
    pub fn with_fs(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replaces the clock port.
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
