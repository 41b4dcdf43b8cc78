use thiserror::Error;

/// Errors from the generation endpoint.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Network-level failure of the HTTP request itself.
    #[error("network request failed: {message}")]
    Request {
        message: String,
        url: Option<String>,
        /// Hint for retry logic/diagnostics.
        is_timeout: bool,
    },

    /// The API returned a non-success status code.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Truncated body excerpt for diagnostics.
        body_snippet: Option<String>,
    },

    /// The request was rejected due to rate limiting.
    #[error("rate limit exceeded, wait and try again")]
    RateLimited,

    /// The request failed due to invalid credentials.
    #[error("authentication failed, check the API key")]
    Authentication,

    /// The response decoded but carried no candidate text.
    #[error("response contained no candidate text")]
    EmptyResponse,

    /// Failed to deserialize the API response.
    #[error("failed to deserialize response: {message}")]
    Deserialization {
        message: String,
        body_snippet: Option<String>,
    },
}

/// Truncates a body for diagnostics, respecting char boundaries.
pub(crate) fn truncate_body(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
