//! Binary entrypoint for the `gistlock` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Optional.
    let _ = dotenvy::dotenv();
    gistlock::init_tracing();

    // Recording is handled in commands::dispatch via GISTLOCK_RECORD=<dir>.
    match gistlock::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
