use serde::Deserialize;

pub const DEFAULT_EMBED_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_EMBED_DIM: usize = 384;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HuggingFaceConfig {
    /// Filled from `HF_API_TOKEN` when the config file leaves it empty.
    pub api_key: String,
    pub model: String,
    pub dimensions: usize,
    /// Override for tests and self-hosted inference endpoints.
    pub api_base: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_EMBED_MODEL.to_string(),
            dimensions: DEFAULT_EMBED_DIM,
            api_base: None,
            timeout_secs: 30,
        }
    }
}
