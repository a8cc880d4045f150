//! Update-or-create of the tracked repository file.
//!
//! The file is read first. A successful read leads to an update carrying the
//! read blob hash, even if the content is unchanged. Any read failure, or a
//! rejected update, falls through to a create. Only a failed create is an
//! error.

use crate::config::GithubConfig;
use crate::context::ServiceContext;
use crate::error::{HttpError, SyncError};

/// Commit message used when the file already exists.
pub const UPDATE_MESSAGE: &str = "Updating file via GitHub Actions";
/// Commit message used when the file is created.
pub const CREATE_MESSAGE: &str = "Creating file via GitHub Actions";

/// Why the read step did not yield the current file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadMiss {
    /// The repository reported the file as absent.
    NotFound,
    /// Any other failure; a retry might have succeeded.
    Transient(HttpError),
}

impl From<HttpError> for ReadMiss {
    fn from(err: HttpError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Transient(err)
        }
    }
}

/// What led the synchronizer to create the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateReason {
    /// The read step failed.
    ReadMissed(ReadMiss),
    /// The file was read but the update was rejected.
    UpdateRejected(HttpError),
}

/// Successful result of [`upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The existing file was updated.
    Updated,
    /// The file was created.
    Created(CreateReason),
}

/// Writes `content` to `path` in the repository.
///
/// # Errors
///
/// Returns [`SyncError`] when the create path is taken and fails.
pub async fn upsert(
    ctx: &ServiceContext,
    github: &GithubConfig,
    path: &str,
    content: &str,
) -> Result<UpsertOutcome, SyncError> {
    let reason = match ctx.repo.get_file(github, path).await {
        Ok(existing) => {
            match ctx.repo.update_file(github, path, UPDATE_MESSAGE, content, &existing.sha).await {
                Ok(()) => return Ok(UpsertOutcome::Updated),
                Err(err) => {
                    tracing::warn!(path, error = %err, "update rejected, attempting create");
                    CreateReason::UpdateRejected(err)
                }
            }
        }
        Err(err) => {
            let miss = ReadMiss::from(err);
            if let ReadMiss::Transient(err) = &miss {
                tracing::warn!(path, error = %err, "read failed for a reason other than absence, attempting create");
            }
            CreateReason::ReadMissed(miss)
        }
    };

    ctx.repo
        .create_file(github, path, CREATE_MESSAGE, content)
        .await
        .map(|()| UpsertOutcome::Created(reason))
        .map_err(|source| SyncError { path: path.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::config::{Credentials, PipelineConfig};
    use chrono::Utc;
    use serde_json::{json, Value};

    fn ctx(entries: Vec<(&str, Value)>) -> ServiceContext {
        let interactions = entries
            .into_iter()
            .zip(0u64..)
            .map(|((method, output), seq)| Interaction {
                seq,
                port: "repo".into(),
                method: method.into(),
                input: json!({}),
                output,
            })
            .collect();
        ServiceContext::from_cassette(&Cassette {
            name: "repo".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        })
    }

    fn github() -> GithubConfig {
        let creds = Credentials { github_token: "t", gist_id: "g", locker_token: "l" };
        PipelineConfig::from_lookup(creds, |_| None).unwrap().github
    }

    fn existing() -> Value {
        json!({"Ok": {"path": "new.txt", "content": "abc123", "sha": "sha1"}})
    }

    fn status(code: u16) -> Value {
        json!({"Err": {"kind": "status", "detail": {"status": code, "body": ""}}})
    }

    #[tokio::test]
    async fn existing_file_is_updated_even_when_unchanged() {
        let ctx = ctx(vec![("get_file", existing()), ("update_file", json!({"Ok": null}))]);
        let outcome = upsert(&ctx, &github(), "new.txt", "abc123").await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
    }

    #[tokio::test]
    async fn missing_file_is_created() {
        let ctx = ctx(vec![("get_file", status(404)), ("create_file", json!({"Ok": null}))]);
        let outcome = upsert(&ctx, &github(), "new.txt", "abc123").await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Created(CreateReason::ReadMissed(ReadMiss::NotFound)));
    }

    #[tokio::test]
    async fn transient_read_failure_still_falls_through_to_create() {
        let ctx = ctx(vec![("get_file", status(502)), ("create_file", json!({"Ok": null}))]);
        let outcome = upsert(&ctx, &github(), "new.txt", "abc123").await.unwrap();
        assert_eq!(
            outcome,
            UpsertOutcome::Created(CreateReason::ReadMissed(ReadMiss::Transient(
                HttpError::Status { status: 502, body: String::new() }
            )))
        );
    }

    #[tokio::test]
    async fn rejected_update_falls_through_to_create() {
        let ctx = ctx(vec![
            ("get_file", existing()),
            ("update_file", status(409)),
            ("create_file", json!({"Ok": null})),
        ]);
        let outcome = upsert(&ctx, &github(), "new.txt", "abc123").await.unwrap();
        assert!(matches!(outcome, UpsertOutcome::Created(CreateReason::UpdateRejected(_))));
    }

    #[tokio::test]
    async fn failed_create_is_an_error() {
        let ctx = ctx(vec![("get_file", status(500)), ("create_file", status(422))]);
        let err = upsert(&ctx, &github(), "new.txt", "abc123").await.unwrap_err();
        assert_eq!(err.path, "new.txt");
        assert_eq!(err.source, HttpError::Status { status: 422, body: String::new() });
    }
}
