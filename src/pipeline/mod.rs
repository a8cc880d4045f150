//! The synchronization-and-publishing pipeline.
//!
//! A run resolves the newest gist revision, writes it into the tracked
//! repository file, requests a gated link to the revision's raw content and
//! persists the result. Revision and repository failures stop the run before
//! any link is requested. Link failures are recorded as sentinels so the
//! output artifacts always exist once link generation has been attempted.

pub mod locker;
pub mod normalize;
pub mod outcome;
pub mod persist;
pub mod revision;
pub mod sync;

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::error::{PipelineError, RevisionNotFound};
use crate::ports::LinkRequest;

use self::outcome::{LinkFailure, LinkOutcome, LinkRecord};
use self::persist::Artifacts;
use self::revision::RevisionId;
use self::sync::UpsertOutcome;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Revision that was published.
    pub revision: RevisionId,
    /// How the tracked file was written.
    pub sync: UpsertOutcome,
    /// Link generation result.
    pub outcome: LinkOutcome,
    /// The persisted record.
    pub record: LinkRecord,
    /// Where the artifacts were written.
    pub artifacts: Artifacts,
}

/// How a run ended without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// No revision was found; nothing was written anywhere.
    Aborted(RevisionNotFound),
    /// Every stage ran; the artifacts exist.
    Published(Publication),
}

/// Runs the pipeline once.
///
/// # Errors
///
/// Returns [`PipelineError::Sync`] if the tracked file could not be written
/// and [`PipelineError::Persist`] if the artifacts could not be written.
pub async fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    let revision = match revision::latest_revision(ctx, &config.github, &config.gist_id).await {
        Ok(revision) => revision,
        Err(reason) => {
            tracing::info!(gist_id = %config.gist_id, %reason, "no revision, stopping");
            return Ok(RunReport::Aborted(reason));
        }
    };

    let sync = sync::upsert(ctx, &config.github, &config.file_path, revision.as_str()).await?;
    tracing::info!(path = %config.file_path, ?sync, "tracked file synchronized");

    let destination = config.destination_url(revision.as_str());
    let request = LinkRequest::new(&config.link, destination.clone());
    let outcome = generate_link(ctx, config, &request).await;

    let record = LinkRecord::new(ctx.clock.now(), &outcome, destination, revision.clone());
    let artifacts = persist::persist(ctx, &config.output_dir, &outcome, &record)?;

    Ok(RunReport::Published(Publication { revision, sync, outcome, record, artifacts }))
}

async fn generate_link(
    ctx: &ServiceContext,
    config: &PipelineConfig,
    request: &LinkRequest,
) -> LinkOutcome {
    match locker::create_link(ctx, &config.locker, request).await {
        Ok(raw) => match normalize::extract_url(&raw) {
            Ok(url) => LinkOutcome::Generated(url),
            Err(failure) => LinkOutcome::Failed(failure),
        },
        Err(err @ crate::error::HttpError::Malformed(_)) => {
            LinkOutcome::Failed(LinkFailure::rejected(err.to_string()))
        }
        Err(err) => LinkOutcome::Failed(LinkFailure::errored(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::config::Credentials;
    use crate::pipeline::outcome::{ERROR_SENTINEL, FAILED_SENTINEL};
    use crate::pipeline::sync::{CreateReason, ReadMiss};
    use chrono::Utc;
    use serde_json::{json, Value};

    fn ctx(entries: Vec<(&str, &str, Value)>) -> ServiceContext {
        let interactions = entries
            .into_iter()
            .zip(0u64..)
            .map(|((port, method, output), seq)| Interaction {
                seq,
                port: port.into(),
                method: method.into(),
                input: json!({}),
                output,
            })
            .collect();
        ServiceContext::from_cassette(&Cassette {
            name: "run".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        })
    }

    fn config() -> PipelineConfig {
        let creds = Credentials { github_token: "t", gist_id: "g", locker_token: "l" };
        PipelineConfig::from_lookup(creds, |_| None).unwrap().with_output_dir("out".into())
    }

    fn through_sync(locker_output: Value) -> Vec<(&'static str, &'static str, Value)> {
        vec![
            ("snippets", "fetch_gist", json!({"Ok": {"history": [{"version": "abc123"}]}})),
            ("repo", "get_file", json!({"Err": {"kind": "status", "detail": {"status": 404, "body": ""}}})),
            ("repo", "create_file", json!({"Ok": null})),
            ("locker", "create_content_locker", locker_output),
            ("clock", "now", json!("2025-01-01T00:00:00Z")),
            ("fs", "write", json!({"Ok": null})),
            ("fs", "write", json!({"Ok": null})),
        ]
    }

    fn published(report: RunReport) -> Publication {
        match report {
            RunReport::Published(publication) => publication,
            RunReport::Aborted(reason) => panic!("expected publication, run aborted: {reason}"),
        }
    }

    #[tokio::test]
    async fn empty_history_aborts_before_any_other_port() {
        // Only the gist lookup is recorded; any further port call would panic.
        let ctx = ctx(vec![("snippets", "fetch_gist", json!({"Ok": {"history": []}}))]);
        let report = run(&ctx, &config()).await.unwrap();
        assert_eq!(report, RunReport::Aborted(RevisionNotFound::EmptyHistory));
    }

    #[tokio::test]
    async fn empty_version_aborts_without_touching_the_repository() {
        let ctx = ctx(vec![("snippets", "fetch_gist", json!({"Ok": {"history": [{"version": ""}]}}))]);
        let report = run(&ctx, &config()).await.unwrap();
        assert_eq!(report, RunReport::Aborted(RevisionNotFound::EmptyVersion));
    }

    #[tokio::test]
    async fn generated_link_is_published_with_revision_in_destination() {
        let ctx = ctx(through_sync(
            json!({"Ok": {"type": "created", "message": {"loot_url": "https://x/y"}}}),
        ));
        let publication = published(run(&ctx, &config()).await.unwrap());

        assert_eq!(publication.revision.as_str(), "abc123");
        assert_eq!(
            publication.sync,
            UpsertOutcome::Created(CreateReason::ReadMissed(ReadMiss::NotFound))
        );
        assert_eq!(publication.outcome, LinkOutcome::Generated("https://x/y".into()));
        assert_eq!(publication.record.loot_url, "https://x/y");
        assert!(publication.record.original_url.contains("/raw/abc123/"));
        assert_eq!(publication.record.key.as_str(), "abc123");
        assert_eq!(publication.artifacts.secret, std::path::Path::new("out").join("secret.txt"));
    }

    #[tokio::test]
    async fn transport_error_records_error_sentinel() {
        let ctx = ctx(through_sync(json!({"Err": {"kind": "transport", "detail": "connection reset"}})));
        let publication = published(run(&ctx, &config()).await.unwrap());
        assert_eq!(publication.outcome.artifact_value(), ERROR_SENTINEL);
        assert_eq!(publication.record.loot_url, ERROR_SENTINEL);
        assert!(publication.record.error.unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn error_status_records_error_sentinel() {
        let ctx = ctx(through_sync(
            json!({"Err": {"kind": "status", "detail": {"status": 401, "body": "bad token"}}}),
        ));
        let publication = published(run(&ctx, &config()).await.unwrap());
        assert_eq!(publication.record.loot_url, ERROR_SENTINEL);
    }

    #[tokio::test]
    async fn malformed_body_records_failed_sentinel() {
        let ctx = ctx(through_sync(json!({"Err": {"kind": "malformed", "detail": "expected value"}})));
        let publication = published(run(&ctx, &config()).await.unwrap());
        assert_eq!(publication.record.loot_url, FAILED_SENTINEL);
    }

    #[tokio::test]
    async fn error_payload_records_failed_sentinel_with_reason() {
        let ctx = ctx(through_sync(json!({"Ok": {"type": "error", "message": "bad"}})));
        let publication = published(run(&ctx, &config()).await.unwrap());
        assert_eq!(
            publication.outcome,
            LinkOutcome::Failed(LinkFailure::rejected("bad"))
        );
        assert_eq!(publication.record.error.as_deref(), Some("bad"));
    }

    #[tokio::test]
    async fn failed_create_is_fatal_and_skips_the_locker() {
        let ctx = ctx(vec![
            ("snippets", "fetch_gist", json!({"Ok": {"history": [{"version": "abc123"}]}})),
            ("repo", "get_file", json!({"Err": {"kind": "transport", "detail": "timeout"}})),
            ("repo", "create_file", json!({"Err": {"kind": "status", "detail": {"status": 422, "body": "sha wasn't supplied"}}})),
        ]);
        let err = run(&ctx, &config()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Sync(_)));
    }
}
