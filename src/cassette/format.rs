//! Cassette data structures for recording and replaying interactions.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port names used as the `port` field of interactions.
pub mod ports {
    /// Clock port.
    pub const CLOCK: &str = "clock";
    /// Local filesystem port.
    pub const FS: &str = "fs";
    /// Gist history port.
    pub const SNIPPETS: &str = "snippets";
    /// Repository contents port.
    pub const REPO: &str = "repo";
    /// Link locker port.
    pub const LOCKER: &str = "locker";

    /// All ports, in the order sessions create their cassettes.
    pub const ALL: [&str; 5] = [CLOCK, FS, SNIPPETS, REPO, LOCKER];
}

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name, one of [`ports::ALL`].
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Non-secret input sent to the port.
    pub input: serde_json::Value,
    /// Output returned from the port; results use `{"Ok": ..}` / `{"Err": ..}`.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit of the working tree at recording time.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}
