use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{truncate_body, LlmError};
use crate::LLM_TIMEOUT_SECS;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const BODY_SNIPPET_MAX: usize = 512;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Filled from `GEMINI_API_KEY` when the config file leaves it empty.
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: LLM_TIMEOUT_SECS,
        }
    }
}

/// Authentication + endpoint details, separated from the config so tests can
/// point the client at a mock server.
#[derive(Debug, Clone)]
pub struct GeminiEnv {
    pub api_key: String,
    pub base_url: String,
}

impl GeminiEnv {
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: GEMINI_BASE.to_string(),
        }
    }

    pub fn from_parts(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    env: GeminiEnv,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, LlmError> {
        Self::new_with_env(config, GeminiEnv::from_config(config))
    }

    pub fn new_with_env(config: &GeminiConfig, env: GeminiEnv) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Request {
                message: e.to_string(),
                url: None,
                is_timeout: false,
            })?;
        Ok(Self {
            env,
            model: config.model.clone(),
            client,
        })
    }

    /// Sends one free-text prompt and returns the first candidate's text.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.env.base_url.trim_end_matches('/'),
            self.model,
            self.env.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let res = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                message: e.to_string(),
                url: Some(redact_key(&url)),
                is_timeout: e.is_timeout(),
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => LlmError::RateLimited,
                401 | 403 => LlmError::Authentication,
                code => LlmError::Api {
                    status: code,
                    message: status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string(),
                    body_snippet: Some(truncate_body(&body, BODY_SNIPPET_MAX)),
                },
            });
        }

        let body = res.text().await.map_err(|e| LlmError::Request {
            message: e.to_string(),
            url: Some(redact_key(&url)),
            is_timeout: e.is_timeout(),
        })?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialization {
                message: e.to_string(),
                body_snippet: Some(truncate_body(&body, BODY_SNIPPET_MAX)),
            })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(LlmError::EmptyResponse)
    }

    /// Answer generation over the assembled context blob, using the fixed
    /// `Context / User Question / Answer` prompt shape.
    pub async fn answer(&self, context: &str, query: &str) -> Result<String, LlmError> {
        let prompt = format!("Context: {context}\n\nUser Question: {query}\n\nAnswer: ");
        self.generate(&prompt).await
    }
}

/// Keeps the API key out of logs and error messages.
fn redact_key(url: &str) -> String {
    match url.split_once("key=") {
        Some((prefix, _)) => format!("{prefix}key=<redacted>"),
        None => url.to_string(),
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig {
            api_key: "test-key".into(),
            model: "gemini-1.5-flash".into(),
            timeout_secs: 5,
        };
        let env = GeminiEnv::from_parts("test-key", server.base_url());
        GeminiClient::new_with_env(&config, env).unwrap()
    }

    #[tokio::test]
    async fn extracts_first_candidate_text() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-1.5-flash:generateContent")
                .query_param("key", "test-key");
            then.status(200).json_body(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "Rifampin treats TB." }] } }
                ]
            }));
        });

        let out = client_for(&server).generate("q").await.unwrap();
        assert_eq!(out, "Rifampin treats TB.");
    }

    #[tokio::test]
    async fn answer_wraps_context_and_question() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-1.5-flash:generateContent")
                .body_contains("Context: some context")
                .body_contains("User Question: a question");
            then.status(200).json_body(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "ok" }] } }
                ]
            }));
        });

        let out = client_for(&server)
            .answer("some context", "a question")
            .await
            .unwrap();
        assert_eq!(out, "ok");
    }

    #[tokio::test]
    async fn maps_rate_limit_status() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path_contains(":generateContent");
            then.status(429).body("slow down");
        });
        let err = client_for(&server).generate("q").await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[tokio::test]
    async fn maps_auth_status() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path_contains(":generateContent");
            then.status(403).body("bad key");
        });
        let err = client_for(&server).generate("q").await.unwrap_err();
        assert!(matches!(err, LlmError::Authentication));
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path_contains(":generateContent");
            then.status(200).json_body(serde_json::json!({ "candidates": [] }));
        });
        let err = client_for(&server).generate("q").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_deserialization() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path_contains(":generateContent");
            then.status(200).body("not json");
        });
        let err = client_for(&server).generate("q").await.unwrap_err();
        match err {
            LlmError::Deserialization { body_snippet, .. } => {
                assert_eq!(body_snippet.as_deref(), Some("not json"));
            }
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }

    #[test]
    fn redacts_api_key_in_urls() {
        let url = "http://host/models/m:generateContent?key=secret";
        assert_eq!(
            redact_key(url),
            "http://host/models/m:generateContent?key=<redacted>"
        );
    }
}
