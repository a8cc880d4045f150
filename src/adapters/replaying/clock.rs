//! Replaying adapter for the `Clock` port.

use chrono::{DateTime, Utc};

use super::{next_output, replay_value, SharedReplayer};
use crate::cassette::format::ports;
use crate::ports::Clock;

/// Serves recorded clock readings.
pub struct ReplayingClock {
    replayer: Option<SharedReplayer>,
}

impl ReplayingClock {
    /// Creates a clock backed by `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a clock with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = next_output(self.replayer.as_ref(), ports::CLOCK, "now");
        replay_value(output, "clock::now")
    }
}
