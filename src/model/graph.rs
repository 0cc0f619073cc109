//! The directed relation graph.

use hashbrown::HashMap;
use serde::Serialize;

use super::{Originator, Relation};

/// Opaque node identifier, valid only within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A graph node: either the query's root identity or an extracted relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum GraphNode {
    Origin(Originator),
    Relation(Relation),
}

impl GraphNode {
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            GraphNode::Relation(r) => Some(r),
            GraphNode::Origin(_) => None,
        }
    }
}

impl std::fmt::Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphNode::Origin(o) => o.fmt(f),
            GraphNode::Relation(r) => r.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct NodeSlot {
    node: GraphNode,
    color: String,
}

/// A directed graph over `Originator | Relation` nodes.
///
/// Edges point from a relation to the node it was derived from. Node
/// identity is by value: adding an already-present node returns the
/// existing id and keeps the first color. Built once per builder call,
/// then read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationGraph {
    nodes: Vec<NodeSlot>,
    edges: Vec<(NodeId, NodeId)>,
    #[serde(skip)]
    index: HashMap<GraphNode, NodeId>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or return the id it already has.
    pub fn add_node(&mut self, node: GraphNode, color: impl Into<String>) -> NodeId {
        if let Some(&id) = self.index.get(&node) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(node.clone(), id);
        self.nodes.push(NodeSlot { node, color: color.into() });
        id
    }

    /// Insert a directed edge. Parallel edges collapse to one.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) {
        if !self.edges.contains(&(src, dst)) {
            self.edges.push((src, dst));
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.0 as usize).map(|s| &s.node)
    }

    pub fn color(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0 as usize).map(|s| s.color.as_str())
    }

    pub fn get(&self, node: &GraphNode) -> Option<NodeId> {
        self.index.get(node).copied()
    }

    /// The first outgoing edge target of `src`, in insertion order.
    pub fn first_target(&self, src: NodeId) -> Option<NodeId> {
        self.edges.iter().find(|(s, _)| *s == src).map(|&(_, d)| d)
    }

    pub fn contains_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.edges.contains(&(src, dst))
    }

    /// All nodes with their ids, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, s)| (NodeId(i as u32), &s.node))
    }

    /// Only the relation nodes, in insertion order.
    pub fn relations(&self) -> impl Iterator<Item = (NodeId, &Relation)> {
        self.nodes().filter_map(|(id, n)| n.as_relation().map(|r| (id, r)))
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::SmallVec;

    use super::*;
    use crate::model::{EtyRelation, RelationFamily};

    fn rel(word: &str) -> GraphNode {
        GraphNode::Relation(Relation::Ety(EtyRelation {
            family: RelationFamily::Mention,
            rtype: "m".into(),
            lang: "la".into(),
            word: word.into(),
            args: SmallVec::new(),
        }))
    }

    #[test]
    fn test_value_identity_dedup() {
        let mut g = RelationGraph::new();
        let a = g.add_node(rel("verbum"), "#111111");
        let b = g.add_node(rel("verbum"), "#222222");
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
        // First color wins.
        assert_eq!(g.color(a), Some("#111111"));
    }

    #[test]
    fn test_parallel_edges_collapse() {
        let mut g = RelationGraph::new();
        let a = g.add_node(rel("a"), "#000000");
        let b = g.add_node(rel("b"), "#000000");
        g.add_edge(a, b);
        g.add_edge(a, b);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_first_target_insertion_order() {
        let mut g = RelationGraph::new();
        let a = g.add_node(rel("a"), "#000000");
        let b = g.add_node(rel("b"), "#000000");
        let c = g.add_node(rel("c"), "#000000");
        assert_eq!(g.first_target(a), None);
        g.add_edge(a, b);
        g.add_edge(a, c);
        assert_eq!(g.first_target(a), Some(b));
    }
}
