//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Serves interactions from a loaded cassette in recorded order, with an
/// independent cursor per port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination. A pipeline stage calling a port it should
    /// not have reached shows up here.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        assert!(
            *cursor < queue.len(),
            "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
             have been consumed. Last interaction was seq={last_seq}.",
            count = queue.len(),
            last_seq = queue.last().map_or(0, |i| i.seq),
        );

        let interaction = &queue[*cursor];
        *cursor += 1;
        interaction
    }

    /// Number of interactions not yet served, across all ports.
    #[cfg(test)]
    pub(crate) fn remaining(&self) -> usize {
        self.queues
            .iter()
            .map(|(key, queue)| queue.len() - self.cursors.get(key).copied().unwrap_or(0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn serves_each_port_method_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "repo", "get_file", json!({"Ok": 1})),
            interaction(1, "repo", "update_file", json!({"Ok": null})),
            interaction(2, "repo", "get_file", json!({"Ok": 2})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining(), 3);

        assert_eq!(replayer.next_interaction("repo", "get_file").seq, 0);
        assert_eq!(replayer.next_interaction("repo", "get_file").seq, 2);
        assert_eq!(replayer.next_interaction("repo", "update_file").seq, 1);
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "have been consumed")]
    fn exhausted_queue_panics() {
        let cassette = make_cassette(vec![interaction(0, "clock", "now", json!("2025-01-01T00:00:00Z"))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("clock", "now");
        let _ = replayer.next_interaction("clock", "now");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unrecorded_method_panics() {
        let cassette = make_cassette(vec![interaction(0, "repo", "update_file", json!({"Ok": null}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("repo", "create_file");
    }
}
