//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them per port/method
/// pair.
pub struct CassetteReplayer {
    /// Per port+method queue of interactions not yet served (in order).
    queues: HashMap<PortMethodKey, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination, printing what was requested versus what
    /// interactions remain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let queue = self.queue(port, method);
        queue.pop_front().unwrap_or_else(|| {
            panic!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed."
            )
        })
    }

    /// Return the earliest unserved interaction for the port and method whose
    /// recorded input equals `input`.
    ///
    /// Used for calls that may complete out of order while recording, such as
    /// concurrent remote fetches.
    ///
    /// # Panics
    ///
    /// Panics if no unserved interaction matches.
    pub fn next_matching(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Interaction {
        let queue = self.queue(port, method);
        let Some(pos) = queue.iter().position(|i| &i.input == input) else {
            panic!(
                "Cassette exhausted: no unserved interaction for port={port:?} \
                 method={method:?} with input {input}. {} other(s) remain.",
                queue.len()
            );
        };
        queue.remove(pos).expect("position is in bounds")
    }

    fn queue(&mut self, port: &str, method: &str) -> &mut VecDeque<Interaction> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };
        if !self.queues.contains_key(&key) {
            let available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }
        self.queues.get_mut(&key).expect("queue checked above")
    }
}
