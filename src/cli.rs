//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `gistlock`.
#[derive(Debug, Parser)]
#[command(
    name = "gistlock",
    version,
    about = "Publish the latest gist revision to a repository file and a LootLabs link"
)]
pub struct Cli {
    /// GitHub token with contents write access to the tracked repository.
    pub github_token: String,
    /// Identifier of the gist whose latest revision is published.
    pub gist_id: String,
    /// LootLabs creator API token.
    pub lootlabs_token: String,
    /// Directory receiving `secret.txt` and `lootlabs_links.json`.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}
