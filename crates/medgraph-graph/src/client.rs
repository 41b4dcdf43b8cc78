use medgraph_core::{GraphNode, KnowledgeGraph, NodeUid};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{snippet, GraphError};

const BODY_SNIPPET_MAX: usize = 512;

/// DQL query pulling every named node with its outgoing `treats` and
/// `side_effect` relations.
const GRAPH_QUERY: &str = r#"
{
  all(func: has(name)) {
    uid
    name
    type
    treats { uid }
    side_effect { uid }
  }
}
"#;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DgraphConfig {
    /// Base endpoint of the Dgraph Alpha HTTP API.
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for DgraphConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Read-only client over the Dgraph HTTP query endpoint.
///
/// Each [`fetch_graph`](Self::fetch_graph) call produces a fresh
/// [`KnowledgeGraph`] snapshot; nothing is cached between calls, so two
/// fetches over unchanged store data are structurally equal.
#[derive(Debug, Clone)]
pub struct DgraphClient {
    endpoint: String,
    client: reqwest::Client,
}

impl DgraphClient {
    pub fn new(config: &DgraphConfig) -> Result<Self, GraphError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_graph(&self) -> Result<KnowledgeGraph, GraphError> {
        let url = format!("{}/query", self.endpoint);
        let res = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "query": GRAPH_QUERY }))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(GraphError::Api {
                status: status.as_u16(),
                body_snippet: snippet(&body, BODY_SNIPPET_MAX),
            });
        }

        let body = res.text().await?;
        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(|e| GraphError::Deserialization {
                message: format!("{e}; body: {}", snippet(&body, BODY_SNIPPET_MAX)),
            })?;

        let graph: KnowledgeGraph = parsed
            .data
            .all
            .into_iter()
            .map(NodeRecord::into_node)
            .collect();
        debug!(nodes = graph.len(), "fetched knowledge graph snapshot");
        Ok(graph)
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    data: QueryData,
}

#[derive(Deserialize, Default)]
struct QueryData {
    #[serde(default)]
    all: Vec<NodeRecord>,
}

#[derive(Deserialize)]
struct NodeRecord {
    uid: String,
    name: String,
    #[serde(default)]
    treats: Vec<UidRef>,
    #[serde(default)]
    side_effect: Vec<UidRef>,
}

#[derive(Deserialize)]
struct UidRef {
    uid: String,
}

impl NodeRecord {
    /// Neighbor list is the union of both relations, `treats` first,
    /// duplicates preserved. Edges stay directed.
    fn into_node(self) -> GraphNode {
        let neighbors = self
            .treats
            .into_iter()
            .chain(self.side_effect)
            .map(|r| NodeUid::new(r.uid))
            .collect();
        GraphNode::new(self.uid, self.name, neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> DgraphClient {
        DgraphClient::new(&DgraphConfig {
            endpoint: server.base_url(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn builds_snapshot_with_union_of_relations() {
        let server = MockServer::start();
        let body = serde_json::json!({
            "data": {
                "all": [
                    {
                        "uid": "0x1",
                        "name": "Rifampin",
                        "type": "drug",
                        "treats": [{ "uid": "0x2" }],
                        "side_effect": [{ "uid": "0x3" }]
                    },
                    { "uid": "0x2", "name": "Tuberculosis", "type": "disease" },
                    { "uid": "0x3", "name": "Hepatotoxicity", "type": "symptom" }
                ]
            }
        });
        let _m = server.mock(|when, then| {
            when.method(POST).path("/query");
            then.status(200).json_body(body);
        });

        let graph = client_for(&server).fetch_graph().await.unwrap();
        assert_eq!(graph.len(), 3);
        let rifampin = graph.get(&NodeUid::from("0x1")).unwrap();
        assert_eq!(rifampin.name, "Rifampin");
        assert_eq!(
            rifampin.neighbors,
            vec![NodeUid::from("0x2"), NodeUid::from("0x3")]
        );
        // directed: the disease does not point back at the drug
        assert!(!graph.has_edge(&NodeUid::from("0x2"), &NodeUid::from("0x1")));
    }

    #[tokio::test]
    async fn refetch_over_unchanged_data_is_structurally_equal() {
        let server = MockServer::start();
        let body = serde_json::json!({
            "data": { "all": [{ "uid": "0x1", "name": "Isoniazid", "type": "drug" }] }
        });
        let _m = server.mock(|when, then| {
            when.method(POST).path("/query");
            then.status(200).json_body(body);
        });

        let client = client_for(&server);
        let first = client.fetch_graph().await.unwrap();
        let second = client.fetch_graph().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn maps_non_success_status_to_api_error() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/query");
            then.status(500).body("alpha unavailable");
        });

        let err = client_for(&server).fetch_graph().await.unwrap_err();
        match err {
            GraphError::Api {
                status,
                body_snippet,
            } => {
                assert_eq!(status, 500);
                assert!(body_snippet.contains("alpha unavailable"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn maps_malformed_body_to_deserialization_error() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/query");
            then.status(200).body("not json");
        });

        let err = client_for(&server).fetch_graph().await.unwrap_err();
        assert!(matches!(err, GraphError::Deserialization { .. }));
    }
}
