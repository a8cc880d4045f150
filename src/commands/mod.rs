//! Command dispatch.

pub mod publish;

use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{Credentials, PipelineConfig};
use crate::context::ServiceContext;

/// Builds the configuration and runs the publish command.
///
/// When `GISTLOCK_RECORD` is set to a directory, every port interaction is
/// recorded to per-port cassette files under it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid, the runtime cannot
/// start, recording fails, or the run fails fatally.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let creds = Credentials {
        github_token: &cli.github_token,
        gist_id: &cli.gist_id,
        locker_token: &cli.lootlabs_token,
    };
    let mut config = PipelineConfig::from_env(creds).map_err(|e| e.to_string())?;
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_dir(dir.clone());
    }
    tracing::debug!(?config, "resolved configuration");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let _guard = runtime.enter();

    let (ctx, session) = if let Ok(path) = env::var("GISTLOCK_RECORD") {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(path))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = runtime.block_on(publish::run(&ctx, &config));

    // Finish recording even when the run failed.
    if let Some(session) = session {
        drop(ctx);
        let dir = session.finish()?;
        eprintln!("Recording saved to: {}", dir.display());
    }

    result
}
