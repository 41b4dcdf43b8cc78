//! Randomized path search over a [`KnowledgeGraph`] snapshot.
//!
//! One *attempt* is a single depth-first walk from the start node with the
//! neighbor order shuffled uniformly at random at every node, backtracking on
//! dead ends, and never revisiting a node already on the current path. An
//! attempt that exhausts its branches is abandoned wholesale and a fresh one
//! starts from scratch; no state carries across attempts. The attempt budget
//! is the only circuit breaker.

use medgraph_core::{KnowledgeGraph, NodeUid};
use rand::seq::SliceRandom;
use tracing::{debug, trace};

/// Independent walk attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Result of a path search. The two failure shapes are domain signals, not
/// errors; callers render them as inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A simple path from the start uid to a node whose name matches the
    /// target: no repeated uid, every consecutive pair a true edge.
    Found(Vec<NodeUid>),
    /// Every attempt exhausted its branches without reaching the target.
    NotFound,
    /// The start uid is not a key of the snapshot; no walk was performed.
    StartMissing,
}

pub struct PathFinder<'g> {
    graph: &'g KnowledgeGraph,
    max_attempts: usize,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g KnowledgeGraph) -> Self {
        Self {
            graph,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(graph: &'g KnowledgeGraph, max_attempts: usize) -> Self {
        Self {
            graph,
            max_attempts,
        }
    }

    /// Searches for *some* simple path from `start` to any node named
    /// `target_name`. Non-deterministic by design: repeated calls may return
    /// different paths, or fail where another call succeeded, once the
    /// attempt budget bites on a large sparse graph.
    pub fn traverse(&self, start: &NodeUid, target_name: &str) -> SearchOutcome {
        if !self.graph.contains(start) {
            return SearchOutcome::StartMissing;
        }
        for attempt in 0..self.max_attempts {
            if let Some(path) = self.random_walk(start, target_name) {
                debug!(attempt, len = path.len(), "path found");
                return SearchOutcome::Found(path);
            }
            trace!(attempt, "walk exhausted, restarting");
        }
        SearchOutcome::NotFound
    }

    /// One attempt: an explicit-stack depth-first walk. Each stack frame
    /// holds the not-yet-tried neighbors (shuffled) of the node at the same
    /// depth in `path`; popping a frame backtracks one level.
    fn random_walk(&self, start: &NodeUid, target_name: &str) -> Option<Vec<NodeUid>> {
        let mut rng = rand::rng();
        let root = self.graph.get(start)?;
        if root.name == target_name {
            return Some(vec![start.clone()]);
        }

        let mut path = vec![start.clone()];
        let mut stack = vec![shuffled(&root.neighbors, &mut rng)];

        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.pop() else {
                // dead end: abandon this branch
                stack.pop();
                path.pop();
                continue;
            };
            if path.contains(&next) {
                continue;
            }
            // neighbor uids may dangle (unnamed nodes never enter the
            // snapshot); those are dead candidates
            let Some(node) = self.graph.get(&next) else {
                continue;
            };
            path.push(next);
            if node.name == target_name {
                return Some(path);
            }
            stack.push(shuffled(&node.neighbors, &mut rng));
        }
        None
    }
}

fn shuffled(neighbors: &[NodeUid], rng: &mut impl rand::Rng) -> Vec<NodeUid> {
    let mut order: Vec<NodeUid> = neighbors.to_vec();
    order.shuffle(rng);
    order
}
