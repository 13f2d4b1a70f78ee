//! Replaying adapter for the `MappingProvider` port.

use std::sync::Mutex;

use super::extract_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{MappingProvider, ProviderFuture, RemoteQuery};

/// Serves recorded provider responses from a cassette.
///
/// Responses are matched to requests by query, since concurrent column
/// fetches may have been recorded in either order.
pub struct ReplayingMappingProvider {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingMappingProvider {
    /// Create a replaying provider backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl MappingProvider for ReplayingMappingProvider {
    fn fetch(&self, query: &RemoteQuery) -> ProviderFuture<'_> {
        let input = serde_json::to_value(query).expect("queries always serialize");
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer.next_matching("remote", "fetch", &input).output
        };
        Box::pin(async move { extract_result(&output, "remote::fetch") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::ports::Column;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn serves_response_for_matching_query() {
        let cassette = Cassette {
            name: "remote".into(),
            recorded_at: Utc::now(),
            tool_version: String::new(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "remote".into(),
                    method: "fetch".into(),
                    input: json!({"mode": "column", "column": "C"}),
                    output: json!({"ok": "v\nAlpha"}),
                },
                Interaction {
                    seq: 1,
                    port: "remote".into(),
                    method: "fetch".into(),
                    input: json!({"mode": "column", "column": "A"}),
                    output: json!({"err": "timed out"}),
                },
            ],
        };
        let provider = ReplayingMappingProvider::new(CassetteReplayer::new(&cassette));

        let a = provider.fetch(&RemoteQuery::Column(Column::A)).await;
        let c = provider.fetch(&RemoteQuery::Column(Column::C)).await;

        assert_eq!(a.unwrap_err().to_string(), "timed out");
        assert_eq!(c.unwrap(), "v\nAlpha");
    }
}
