//! Shared domain types for the medgraph workspace.
//!
//! The central type is [`KnowledgeGraph`], a read-only snapshot of the medical
//! knowledge graph fetched from the graph store at the start of each reasoning
//! request and discarded afterwards. Nothing here performs I/O.

mod graph;

pub use graph::{GraphNode, KnowledgeGraph, NodeUid};
