//! Graph-store access and path reasoning.
//!
//! [`DgraphClient`] snapshots the medical knowledge graph out of a Dgraph
//! instance; [`PathFinder`] runs the randomized depth-first walk over that
//! snapshot to connect two concepts. The walk is deliberately
//! non-deterministic: neighbor order is shuffled per visit and failed
//! attempts restart from scratch, so two identical calls may return
//! different (individually valid) paths.

pub mod client;
pub mod error;
pub mod search;

pub use client::{DgraphClient, DgraphConfig};
pub use error::GraphError;
pub use search::{PathFinder, SearchOutcome, DEFAULT_MAX_ATTEMPTS};
