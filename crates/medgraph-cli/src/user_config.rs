//! Process-wide configuration: loaded once at startup, immutable thereafter,
//! handed to each collaborator at construction.

use std::path::{Path, PathBuf};

use medgraph_graph::DgraphConfig;
use medgraph_llm::GeminiConfig;
use medgraph_rag::{PineconeConfig, ReasoningConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub use medgraph_embed::HuggingFaceConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub pinecone: PineconeConfig,
    pub huggingface: HuggingFaceConfig,
    pub gemini: GeminiConfig,
    pub dgraph: DgraphConfig,
    pub reasoning: ReasoningConfig,
}

impl UserConfig {
    /// Loads from `path`, or `<config_dir>/medgraph/config.toml` when no
    /// override is given. A missing default file is not an error; every
    /// section has defaults and keys can come from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let Some(dir) = dirs::config_dir() else {
                    debug!("no config directory on this platform, using defaults");
                    return Ok(Self::default());
                };
                let default = dir.join("medgraph").join("config.toml");
                if !default.exists() {
                    debug!(path = %default.display(), "no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Fills API keys left empty by the file from the environment
    /// (`.env` is loaded before this runs).
    pub fn resolve_env(&mut self) {
        fill_from_env(&mut self.pinecone.api_key, "PINECONE_API_KEY");
        fill_from_env(&mut self.huggingface.api_key, "HF_API_TOKEN");
        fill_from_env(&mut self.gemini.api_key, "GEMINI_API_KEY");
        if self.pinecone.index_host.is_empty() {
            if let Ok(host) = std::env::var("PINECONE_INDEX_HOST") {
                self.pinecone.index_host = host;
            }
        }
    }

    /// Everything the mandatory pipeline steps need must be present before
    /// any request goes out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pinecone.api_key.is_empty() {
            return Err(ConfigError::Missing(
                "pinecone.api_key (or PINECONE_API_KEY)",
            ));
        }
        if self.pinecone.index_host.is_empty() {
            return Err(ConfigError::Missing(
                "pinecone.index_host (or PINECONE_INDEX_HOST)",
            ));
        }
        if self.gemini.api_key.is_empty() {
            return Err(ConfigError::Missing("gemini.api_key (or GEMINI_API_KEY)"));
        }
        Ok(())
    }
}

fn fill_from_env(slot: &mut String, var: &str) {
    if slot.is_empty() {
        if let Ok(value) = std::env::var(var) {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: UserConfig = toml::from_str(
            r#"
            [pinecone]
            index_host = "https://idx.example"
            top_k = 5

            [reasoning]
            max_attempts = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.pinecone.index_host, "https://idx.example");
        assert_eq!(config.pinecone.top_k, 5);
        assert_eq!(config.reasoning.max_attempts, 10);
        // untouched sections keep their defaults
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(
            config.huggingface.model,
            "sentence-transformers/all-MiniLM-L6-v2"
        );
        assert_eq!(config.dgraph.endpoint, "http://localhost:8080");
    }

    #[test]
    fn validate_names_the_first_missing_setting() {
        let config = UserConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }
}
