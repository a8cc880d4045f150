//! `gistlock` publish run: executes the pipeline and reports progress.

use crate::config::PipelineConfig;
use crate::context::ServiceContext;
use crate::pipeline::outcome::LinkOutcome;
use crate::pipeline::sync::UpsertOutcome;
use crate::pipeline::{self, Publication, RunReport};

/// Runs the pipeline and prints what happened.
///
/// A missing revision and a failed link are reported but are not errors.
///
/// # Errors
///
/// Returns an error string if the tracked file or the artifacts could not be
/// written.
pub async fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    match pipeline::run(ctx, config).await.map_err(|e| e.to_string())? {
        RunReport::Aborted(reason) => {
            println!("Failed to retrieve latest commit hash of the Gist: {reason}");
        }
        RunReport::Published(publication) => print_publication(&publication),
    }
    Ok(())
}

fn print_publication(publication: &Publication) {
    match &publication.sync {
        UpsertOutcome::Updated => println!("File updated successfully!"),
        UpsertOutcome::Created(_) => println!("File created successfully!"),
    }

    match &publication.outcome {
        LinkOutcome::Generated(url) => {
            println!("Generated LootLabs link: {url}");
            println!("Original URL: {}", publication.record.original_url);
            println!("Key: {}", publication.revision);
            println!("Saved to {}", publication.artifacts.secret.display());
        }
        LinkOutcome::Failed(failure) => {
            eprintln!("Failed to generate LootLabs link: {}", failure.reason);
            println!("Wrote {} to {}", failure.sentinel(), publication.artifacts.secret.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::config::Credentials;
    use serde_json::json;

    #[tokio::test]
    async fn missing_revision_is_not_an_error() {
        let dir = std::env::temp_dir().join("gistlock_publish_abort_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.cassette.yaml");
        let mut rec = CassetteRecorder::new(&path, "abort", "abc");
        rec.record("snippets", "fetch_gist", json!({"gist_id": "g"}), json!({"Ok": {}}));
        rec.finish().unwrap();

        let ctx = ServiceContext::from_cassette(&Cassette::load(&path).unwrap());
        let creds = Credentials { github_token: "t", gist_id: "g", locker_token: "l" };
        let config = PipelineConfig::from_lookup(creds, |_| None).unwrap();
        assert!(run(&ctx, &config).await.is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
