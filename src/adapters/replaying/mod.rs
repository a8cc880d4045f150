//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod locker;
pub mod repository;
pub mod snippets;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use locker::ReplayingLinkLocker;
pub use repository::ReplayingRepositoryHost;
pub use snippets::ReplayingSnippetHost;

/// Replayer shared by every adapter reading from the same cassette.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Takes the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the adapter has no cassette or the cassette is exhausted.
pub(crate) fn next_output(
    replayer: Option<&SharedReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("{port} port not configured for replay: no cassette loaded for {port}::{method}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Decodes a recorded plain value.
///
/// # Panics
///
/// Panics if the recorded value does not match `T`.
pub(crate) fn replay_value<T: DeserializeOwned>(output: serde_json::Value, context: &str) -> T {
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{context}: recorded output does not decode: {e}"))
}

/// Decodes a recorded `{"Ok": v}` / `{"Err": e}` result.
///
/// # Panics
///
/// Panics if the output uses neither key or does not decode.
pub(crate) fn replay_result<T, E>(output: serde_json::Value, context: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    match output {
        serde_json::Value::Object(mut map) => {
            if let Some(err) = map.remove("Err") {
                return Err(replay_value(err, context));
            }
            let ok = map
                .remove("Ok")
                .unwrap_or_else(|| panic!("{context}: recorded output has neither Ok nor Err"));
            Ok(replay_value(ok, context))
        }
        other => panic!("{context}: recorded output is not a result object: {other}"),
    }
}
