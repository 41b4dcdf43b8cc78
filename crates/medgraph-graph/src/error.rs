use thiserror::Error;

/// Failures talking to the graph store. Path-search outcomes (start missing,
/// no path) are not errors; see [`crate::search::SearchOutcome`].
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("graph store error (status {status}): {body_snippet}")]
    Api { status: u16, body_snippet: String },

    #[error("failed to decode graph store response: {message}")]
    Deserialization { message: String },
}

/// Truncates a response body for inclusion in diagnostics.
pub(crate) fn snippet(body: &str, max: usize) -> String {
    if body.len() <= max {
        body.to_string()
    } else {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}
