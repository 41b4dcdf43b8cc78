use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("embedding API error: status {status}, body {body}")]
    Api { status: u16, body: String },

    #[error("embedding response had {got} dimensions, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },

    #[error("embedding response was empty")]
    Empty,
}
