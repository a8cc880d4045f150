//! Recording adapters that capture interactions to cassettes.
//!
//! Inputs never include credentials: the GitHub and LootLabs tokens stay in
//! the config values and are not part of any recorded payload.

pub mod clock;
pub mod filesystem;
pub mod locker;
pub mod repository;
pub mod snippets;

use serde::Serialize;

use crate::cassette::session::SharedRecorder;

/// Record an interaction with a plain (non-Result) return value.
///
/// Mirror of `replaying::replay_value`.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a `Result<T, E>` interaction as `{"Ok": v}` or `{"Err": e}`.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: Serialize,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "Ok": v }),
        Err(e) => serde_json::json!({ "Err": e }),
    };
    record_interaction(recorder, port, method, input, &output);
}
