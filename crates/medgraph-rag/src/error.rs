use thiserror::Error;

use crate::retrieval::RetrievalError;

/// Pipeline-level failures. Only mandatory steps surface here: embedding,
/// retrieval, and answer generation abort the query, while concept
/// extraction and graph reasoning degrade to placeholders inside the report.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("embedding error: {0}")]
    Embed(#[from] medgraph_embed::EmbedError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("generation error: {0}")]
    Llm(#[from] medgraph_llm::LlmError),
}
