//! Retrieval and orchestration.
//!
//! [`PineconeStore`] answers top-K similarity queries against the hosted
//! vector index; [`RagPipeline`] sequences concept extraction, retrieval,
//! graph reasoning, and answer generation into a single [`QueryReport`].

pub mod context;
pub mod error;
pub mod pipeline;
pub mod retrieval;

pub use error::RagError;
pub use pipeline::{QueryReport, RagPipeline, ReasoningConfig};
pub use retrieval::{PineconeConfig, PineconeStore, RetrievalError, Snippet};
