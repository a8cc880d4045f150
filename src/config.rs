//! Immutable run configuration.
//!
//! Credentials come from the command line. Everything else has a built-in
//! default that can be overridden through the environment (a `.env` file is
//! loaded by the binary before this runs):
//!
//! - `GISTLOCK_GITHUB_API` - GitHub REST base URL (default `https://api.github.com`)
//! - `GISTLOCK_OWNER` / `GISTLOCK_REPO` / `GISTLOCK_FILE_PATH` - tracked file
//! - `GISTLOCK_DESTINATION_TEMPLATE` - destination URL, must contain `{revision}`
//! - `GISTLOCK_LINK_TITLE` / `GISTLOCK_TIER_ID` / `GISTLOCK_TASKS` / `GISTLOCK_THEME`
//! - `GISTLOCK_LOCKER_URL` / `GISTLOCK_ENCRYPTOR_URL` - LootLabs endpoints
//! - `GISTLOCK_OUTPUT_DIR` - where `secret.txt` and `lootlabs_links.json` go

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Default GitHub REST API base.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
/// Default owner of the tracked repository.
pub const DEFAULT_OWNER: &str = "MADNESSTEST";
/// Default tracked repository.
pub const DEFAULT_REPO: &str = "need";
/// Default tracked file.
pub const DEFAULT_FILE_PATH: &str = "new.txt";
/// Default destination template; `{revision}` is replaced by the gist revision.
pub const DEFAULT_DESTINATION_TEMPLATE: &str =
    "https://gist.githubusercontent.com/MADNESSTEST/d68fc1ce7ea72159553b21b769a4be1c/raw/{revision}/key";
/// LootLabs content locker endpoint.
pub const DEFAULT_LOCKER_URL: &str = "https://creators.lootlabs.gg/api/public/content_locker";
/// LootLabs URL encryptor endpoint.
pub const DEFAULT_ENCRYPTOR_URL: &str = "https://creators.lootlabs.gg/api/public/url_encryptor";

const REVISION_PLACEHOLDER: &str = "{revision}";

/// GitHub credentials and the repository the tracked file lives in.
#[derive(Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// REST API base URL without a trailing slash.
    pub api_base: String,
    /// Personal access token.
    pub token: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish()
    }
}

/// LootLabs credentials and endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct LockerConfig {
    /// LootLabs API token.
    pub api_token: String,
    /// Content locker creation endpoint.
    pub content_locker_url: String,
    /// URL encryptor endpoint.
    pub url_encryptor_url: String,
}

impl fmt::Debug for LockerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockerConfig")
            .field("api_token", &"<redacted>")
            .field("content_locker_url", &self.content_locker_url)
            .field("url_encryptor_url", &self.url_encryptor_url)
            .finish()
    }
}

/// Fixed parameters of the gated link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSettings {
    /// Title shown on the locker page.
    pub title: String,
    /// Monetization tier.
    pub tier_id: u32,
    /// Number of tasks the visitor must complete.
    pub number_of_tasks: u32,
    /// Visual theme.
    pub theme: u32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self { title: "Script Key Access".into(), tier_id: 1, number_of_tasks: 3, theme: 3 }
    }
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// GitHub side.
    pub github: GithubConfig,
    /// LootLabs side.
    pub locker: LockerConfig,
    /// Gist whose history is tracked.
    pub gist_id: String,
    /// Path of the tracked file inside the repository.
    pub file_path: String,
    /// Destination URL template containing `{revision}`.
    pub destination_template: String,
    /// Link parameters.
    pub link: LinkSettings,
    /// Directory receiving the output artifacts.
    pub output_dir: PathBuf,
}

/// Credentials supplied on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    /// GitHub token.
    pub github_token: &'a str,
    /// Gist identifier.
    pub gist_id: &'a str,
    /// LootLabs token.
    pub locker_token: &'a str,
}

impl PipelineConfig {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is empty or an override is invalid.
    pub fn from_env(creds: Credentials<'_>) -> Result<Self, ConfigError> {
        Self::from_lookup(creds, |key| std::env::var(key).ok())
    }

    /// Builds the configuration, resolving overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is empty or an override is invalid.
    pub fn from_lookup<F>(creds: Credentials<'_>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        require("GitHub token", creds.github_token)?;
        require("gist id", creds.gist_id)?;
        require("LootLabs token", creds.locker_token)?;

        let text = |key: &str, default: &str| {
            lookup(key).filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
        };
        let number = |key: &'static str, default: u32| -> Result<u32, ConfigError> {
            match lookup(key).filter(|v| !v.is_empty()) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid { key, value: value.clone() }),
                None => Ok(default),
            }
        };

        let destination_template =
            text("GISTLOCK_DESTINATION_TEMPLATE", DEFAULT_DESTINATION_TEMPLATE);
        if !destination_template.contains(REVISION_PLACEHOLDER) {
            return Err(ConfigError::Template(destination_template));
        }

        let defaults = LinkSettings::default();
        Ok(Self {
            github: GithubConfig {
                api_base: text("GISTLOCK_GITHUB_API", DEFAULT_GITHUB_API)
                    .trim_end_matches('/')
                    .to_string(),
                token: creds.github_token.to_string(),
                owner: text("GISTLOCK_OWNER", DEFAULT_OWNER),
                repo: text("GISTLOCK_REPO", DEFAULT_REPO),
            },
            locker: LockerConfig {
                api_token: creds.locker_token.to_string(),
                content_locker_url: text("GISTLOCK_LOCKER_URL", DEFAULT_LOCKER_URL),
                url_encryptor_url: text("GISTLOCK_ENCRYPTOR_URL", DEFAULT_ENCRYPTOR_URL),
            },
            gist_id: creds.gist_id.to_string(),
            file_path: text("GISTLOCK_FILE_PATH", DEFAULT_FILE_PATH),
            destination_template,
            link: LinkSettings {
                title: text("GISTLOCK_LINK_TITLE", &defaults.title),
                tier_id: number("GISTLOCK_TIER_ID", defaults.tier_id)?,
                number_of_tasks: number("GISTLOCK_TASKS", defaults.number_of_tasks)?,
                theme: number("GISTLOCK_THEME", defaults.theme)?,
            },
            output_dir: PathBuf::from(text("GISTLOCK_OUTPUT_DIR", ".")),
        })
    }

    /// Returns a copy writing its artifacts to `dir`.
    #[must_use]
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Interpolates `revision` into the destination template.
    #[must_use]
    pub fn destination_url(&self, revision: &str) -> String {
        self.destination_template.replace(REVISION_PLACEHOLDER, revision)
    }
}

fn require(what: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty(what))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const CREDS: Credentials<'static> =
        Credentials { github_token: "ghp_secret", gist_id: "gist1", locker_token: "ll_secret" };

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_published_pipeline() {
        let config = PipelineConfig::from_lookup(CREDS, lookup_from(&[])).unwrap();
        assert_eq!(config.github.owner, "MADNESSTEST");
        assert_eq!(config.github.repo, "need");
        assert_eq!(config.file_path, "new.txt");
        assert_eq!(config.link, LinkSettings::default());
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(
            config.destination_url("abc123"),
            "https://gist.githubusercontent.com/MADNESSTEST/d68fc1ce7ea72159553b21b769a4be1c/raw/abc123/key"
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = PipelineConfig::from_lookup(
            CREDS,
            lookup_from(&[
                ("GISTLOCK_GITHUB_API", "http://localhost:9000/"),
                ("GISTLOCK_REPO", "other"),
                ("GISTLOCK_TASKS", "5"),
                ("GISTLOCK_DESTINATION_TEMPLATE", "https://h/{revision}"),
            ]),
        )
        .unwrap();
        assert_eq!(config.github.api_base, "http://localhost:9000");
        assert_eq!(config.github.repo, "other");
        assert_eq!(config.link.number_of_tasks, 5);
        assert_eq!(config.destination_url("r1"), "https://h/r1");
    }

    #[test]
    fn rejects_non_numeric_tier() {
        let err =
            PipelineConfig::from_lookup(CREDS, lookup_from(&[("GISTLOCK_TIER_ID", "gold")]))
                .unwrap_err();
        assert_eq!(err, ConfigError::Invalid { key: "GISTLOCK_TIER_ID", value: "gold".into() });
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let err = PipelineConfig::from_lookup(
            CREDS,
            lookup_from(&[("GISTLOCK_DESTINATION_TEMPLATE", "https://h/static")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Template(_)));
    }

    #[test]
    fn rejects_blank_credentials() {
        let creds = Credentials { github_token: " ", ..CREDS };
        let err = PipelineConfig::from_lookup(creds, lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Empty("GitHub token"));
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let config = PipelineConfig::from_lookup(CREDS, lookup_from(&[])).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(!debug.contains("ll_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
