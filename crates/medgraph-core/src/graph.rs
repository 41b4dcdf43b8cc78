use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque node identifier assigned by the graph store (a Dgraph uid such as
/// `"0x2711"`). Unique per node; display names are not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeUid(String);

impl NodeUid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeUid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeUid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A node of the knowledge-graph snapshot.
///
/// `neighbors` is the union of the outgoing `treats` and `side_effect`
/// relations, in store order. Duplicates, self-references, and asymmetric
/// edges (A lists B without B listing A) are all permitted; relations like
/// "treats" are directional, so the snapshot is never symmetrized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub uid: NodeUid,
    pub name: String,
    pub neighbors: Vec<NodeUid>,
}

impl GraphNode {
    pub fn new(uid: impl Into<NodeUid>, name: impl Into<String>, neighbors: Vec<NodeUid>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            neighbors,
        }
    }
}

/// Immutable snapshot of the medical knowledge graph, keyed by uid.
///
/// Built fresh from the graph store for each reasoning request; no caching or
/// incremental update. Rebuilding over unchanged store data yields a
/// structurally equal snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    nodes: HashMap<NodeUid, GraphNode>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: GraphNode) {
        self.nodes.insert(node.uid.clone(), node);
    }

    pub fn get(&self, uid: &NodeUid) -> Option<&GraphNode> {
        self.nodes.get(uid)
    }

    pub fn contains(&self, uid: &NodeUid) -> bool {
        self.nodes.contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeUid, &GraphNode)> {
        self.nodes.iter()
    }

    /// Resolves a display name to a uid. Names are not guaranteed unique;
    /// when several nodes share one, an arbitrary match wins.
    pub fn uid_for_name(&self, name: &str) -> Option<&NodeUid> {
        self.nodes
            .values()
            .find(|node| node.name == name)
            .map(|node| &node.uid)
    }

    /// Renders a uid path as ` -> `-joined display names. Uids absent from
    /// the snapshot fall back to the raw uid string.
    pub fn render_path(&self, path: &[NodeUid]) -> String {
        path.iter()
            .map(|uid| {
                self.get(uid)
                    .map(|node| node.name.as_str())
                    .unwrap_or_else(|| uid.as_str())
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// True when `from` lists `to` among its neighbors.
    pub fn has_edge(&self, from: &NodeUid, to: &NodeUid) -> bool {
        self.get(from)
            .is_some_and(|node| node.neighbors.contains(to))
    }
}

impl FromIterator<GraphNode> for KnowledgeGraph {
    fn from_iter<T: IntoIterator<Item = GraphNode>>(iter: T) -> Self {
        let mut graph = Self::new();
        for node in iter {
            graph.insert(node);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> NodeUid {
        NodeUid::from(s)
    }

    fn sample() -> KnowledgeGraph {
        KnowledgeGraph::from_iter([
            GraphNode::new("0x1", "Rifampin", vec![uid("0x2")]),
            GraphNode::new("0x2", "Tuberculosis", vec![]),
        ])
    }

    #[test]
    fn resolves_names_to_uids() {
        let graph = sample();
        assert_eq!(graph.uid_for_name("Rifampin"), Some(&uid("0x1")));
        assert_eq!(graph.uid_for_name("Aspirin"), None);
    }

    #[test]
    fn renders_paths_with_display_names() {
        let graph = sample();
        let rendered = graph.render_path(&[uid("0x1"), uid("0x2")]);
        assert_eq!(rendered, "Rifampin -> Tuberculosis");
    }

    #[test]
    fn render_falls_back_to_uid_for_unknown_nodes() {
        let graph = sample();
        assert_eq!(graph.render_path(&[uid("0x9")]), "0x9");
    }

    #[test]
    fn edges_are_directed() {
        let graph = sample();
        assert!(graph.has_edge(&uid("0x1"), &uid("0x2")));
        assert!(!graph.has_edge(&uid("0x2"), &uid("0x1")));
    }

    #[test]
    fn rebuilding_from_same_records_is_structurally_equal() {
        assert_eq!(sample(), sample());
    }
}
