//! Recording adapter for the `Clock` port.

use chrono::{DateTime, Utc};

use super::record_interaction;
use crate::cassette::format::ports;
use crate::cassette::session::SharedRecorder;
use crate::ports::Clock;

/// Records clock readings while delegating to an inner clock.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: SharedRecorder,
}

impl RecordingClock {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn Clock>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let result = self.inner.now();
        record_interaction(&self.recorder, ports::CLOCK, "now", &(), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::live::clock::LiveClock;
    use crate::cassette::recorder::CassetteRecorder;

    #[test]
    fn records_now_interaction() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("/unused", "test", "abc")));
        let clock = RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder));
        let _ = clock.now();
        let _ = clock.now();
        assert_eq!(recorder.lock().unwrap().len(), 2);
    }
}
