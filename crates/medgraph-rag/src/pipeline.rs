use medgraph_embed::HuggingFaceBackend;
use medgraph_graph::{DgraphClient, PathFinder, SearchOutcome};
use medgraph_llm::{extraction_prompt, parse_concepts, polish_prompt, GeminiClient};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::context::assemble_context;
use crate::error::RagError;
use crate::retrieval::{PineconeStore, Snippet};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Independent randomized-walk attempts before the path search gives up.
    pub max_attempts: usize,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            max_attempts: medgraph_graph::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Everything the front end displays for one query.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub question: String,
    pub start_concept: Option<String>,
    pub target_concept: Option<String>,
    pub snippets: Vec<Snippet>,
    /// Rendered reasoning path or inline failure message; `None` when
    /// concept extraction produced nothing and reasoning was skipped.
    pub reasoning: Option<String>,
    pub raw_answer: String,
    pub polished_answer: Option<String>,
}

/// Orchestrates one query end to end: extract concepts, retrieve snippets,
/// reason over the graph, generate (and optionally polish) an answer.
///
/// Constructed once from process-start configuration; queries run one at a
/// time and share no mutable state. The graph snapshot is re-fetched per
/// query and discarded with the report.
pub struct RagPipeline {
    embedder: HuggingFaceBackend,
    store: PineconeStore,
    graph_client: DgraphClient,
    llm: GeminiClient,
    reasoning: ReasoningConfig,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        embedder: HuggingFaceBackend,
        store: PineconeStore,
        graph_client: DgraphClient,
        llm: GeminiClient,
        reasoning: ReasoningConfig,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            graph_client,
            llm,
            reasoning,
            top_k,
        }
    }

    #[instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn answer(&self, question: &str, polish: bool) -> Result<QueryReport, RagError> {
        let (start_concept, target_concept) = self.extract_concepts(question).await;
        info!(?start_concept, ?target_concept, "extracted concepts");

        // retrieval is mandatory: failures abort the query
        let embedding = self.embedder.embed_query(question).await?;
        let snippets = self.store.query(&embedding, self.top_k).await?;
        info!(retrieved = snippets.len(), "vector search complete");

        let reasoning = match (&start_concept, &target_concept) {
            (Some(start), Some(target)) => Some(self.graph_reasoning(start, target).await),
            _ => None,
        };

        let context = assemble_context(&snippets, reasoning.as_deref());
        let raw_answer = self.llm.answer(&context, question).await?;
        let polished_answer = if polish {
            Some(self.llm.generate(&polish_prompt(&raw_answer)).await?)
        } else {
            None
        };

        Ok(QueryReport {
            question: question.to_string(),
            start_concept,
            target_concept,
            snippets,
            reasoning,
            raw_answer,
            polished_answer,
        })
    }

    /// Concept extraction is best-effort: a failed request or a malformed
    /// reply both degrade to `(None, None)` and the pipeline continues with
    /// retrieval-only context.
    async fn extract_concepts(&self, question: &str) -> (Option<String>, Option<String>) {
        match self.llm.generate(&extraction_prompt(question)).await {
            Ok(response) => parse_concepts(&response),
            Err(err) => {
                warn!(%err, "concept extraction failed, continuing without graph reasoning");
                (None, None)
            }
        }
    }

    /// Snapshots the graph and searches for a path between the two concepts.
    /// Always yields display text; store failures and search misses become
    /// inline messages rather than errors.
    async fn graph_reasoning(&self, start_name: &str, target_name: &str) -> String {
        let graph = match self.graph_client.fetch_graph().await {
            Ok(graph) => graph,
            Err(err) => {
                warn!(%err, "graph snapshot failed, reasoning degraded");
                return format!("Graph reasoning unavailable: {err}");
            }
        };

        let Some(start_uid) = graph.uid_for_name(start_name) else {
            return format!("Start node '{start_name}' not found in graph.");
        };

        let finder = PathFinder::with_max_attempts(&graph, self.reasoning.max_attempts);
        match finder.traverse(start_uid, target_name) {
            SearchOutcome::Found(path) => graph.render_path(&path),
            SearchOutcome::NotFound | SearchOutcome::StartMissing => {
                format!("No path found from '{start_name}' to '{target_name}'.")
            }
        }
    }
}
