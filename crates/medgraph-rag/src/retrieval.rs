use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("vector index request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("vector index error: status {status}, body {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PineconeConfig {
    /// Filled from `PINECONE_API_KEY` when the config file leaves it empty.
    pub api_key: String,
    /// Host of the index, e.g. `https://medical-graphrag-xxxx.svc.pinecone.io`.
    pub index_host: String,
    pub top_k: usize,
    pub timeout_secs: u64,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_host: String::new(),
            top_k: DEFAULT_TOP_K,
            timeout_secs: 30,
        }
    }
}

/// One retrieved chunk. The similarity score is carried for display but the
/// pipeline only consumes the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub text: String,
    pub score: f32,
}

/// Query-only client for a Pinecone-style vector index.
#[derive(Debug, Clone)]
pub struct PineconeStore {
    api_key: String,
    index_host: String,
    client: reqwest::Client,
}

impl PineconeStore {
    pub fn new(config: &PineconeConfig) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            api_key: config.api_key.clone(),
            index_host: config.index_host.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Returns the `top_k` most similar stored snippets, ranked by the index.
    #[instrument(skip(self, vector), fields(dims = vector.len()))]
    pub async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Snippet>, RetrievalError> {
        let url = format!("{}/query", self.index_host);
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };
        let res = self.client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(RetrievalError::Api { status, body });
        }

        let parsed = res.json::<QueryResponse>().await?;
        let snippets = parsed
            .matches
            .into_iter()
            .filter_map(|m| match m.metadata.and_then(|md| md.text) {
                Some(text) => Some(Snippet {
                    text,
                    score: m.score,
                }),
                None => {
                    warn!(id = %m.id, "match carried no text metadata, skipping");
                    None
                }
            })
            .collect();
        Ok(snippets)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct Match {
    #[serde(default)]
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<Metadata>,
}

#[derive(Deserialize)]
struct Metadata {
    text: Option<String>,
}
