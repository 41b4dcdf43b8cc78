use serde::Serialize;
use tracing::instrument;

use crate::{config::HuggingFaceConfig, error::EmbedError};

const HF_INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    inputs: &'a [&'a str],
}

/// Sentence-embedding backend over the Hugging Face Inference API.
#[derive(Debug)]
pub struct HuggingFaceBackend {
    api_key: String,
    api_url: String,
    dimensions: usize,
    client: reqwest::Client,
}

impl HuggingFaceBackend {
    pub fn new(config: &HuggingFaceConfig) -> Result<Self, EmbedError> {
        let base = config
            .api_base
            .clone()
            .unwrap_or_else(|| HF_INFERENCE_BASE.to_string());
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            api_key: config.api_key.clone(),
            api_url: format!("{}/{}", base.trim_end_matches('/'), config.model),
            dimensions: config.dimensions,
            client,
        })
    }

    /// Embeds a batch of texts; output order matches input order.
    #[instrument(skip(self, snippets), fields(batch = snippets.len()))]
    pub async fn compute_batch(&self, snippets: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let request_body = EmbeddingRequest { inputs: snippets };
        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(EmbedError::Api { status, body });
        }

        let vectors = res.json::<Vec<Vec<f32>>>().await?;
        for v in &vectors {
            if v.len() != self.dimensions {
                return Err(EmbedError::DimensionMismatch {
                    got: v.len(),
                    expected: self.dimensions,
                });
            }
        }
        Ok(vectors)
    }

    /// Embeds a single query string.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.compute_batch(&[text]).await?;
        if vectors.is_empty() {
            return Err(EmbedError::Empty);
        }
        Ok(vectors.swap_remove(0))
    }
}
