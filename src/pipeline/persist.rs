//! Writes the run's output artifacts.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::PersistError;

use super::outcome::{LinkOutcome, LinkRecord};

/// Single-value artifact: the link or a sentinel.
pub const SECRET_FILE: &str = "secret.txt";
/// Structured artifact: the full [`LinkRecord`].
pub const RECORD_FILE: &str = "lootlabs_links.json";

/// Paths of the artifacts written by [`persist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Path of `secret.txt`.
    pub secret: PathBuf,
    /// Path of `lootlabs_links.json`.
    pub record: PathBuf,
}

impl Artifacts {
    /// Artifact locations inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self { secret: dir.join(SECRET_FILE), record: dir.join(RECORD_FILE) }
    }
}

/// Overwrites both artifacts in `dir`. The single-value artifact is written
/// first so it exists even if the record cannot be written.
///
/// # Errors
///
/// Returns [`PersistError`] if serialization or a write fails.
pub fn persist(
    ctx: &ServiceContext,
    dir: &Path,
    outcome: &LinkOutcome,
    record: &LinkRecord,
) -> Result<Artifacts, PersistError> {
    let artifacts = Artifacts::in_dir(dir);
    write(ctx, &artifacts.secret, outcome.artifact_value())?;
    let json = serde_json::to_string_pretty(record)?;
    write(ctx, &artifacts.record, &json)?;
    Ok(artifacts)
}

fn write(ctx: &ServiceContext, path: &Path, contents: &str) -> Result<(), PersistError> {
    ctx.fs
        .write(path, contents)
        .map_err(|source| PersistError::Write { path: path.to_path_buf(), source })
}
