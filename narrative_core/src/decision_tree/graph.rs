//! Decision graph - the directed store of events (nodes) and decisions (edges).

use narrative_rules::Branch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::NodeId;

/// A narrative event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNode {
    pub id: NodeId,

    /// Generated text, written once when the node is created.
    pub description: String,
}

/// A decision leading from one event to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionEdge {
    pub from: NodeId,
    pub to: NodeId,

    /// Label of the choice taken, one side of a decision pair.
    pub choice: String,

    /// Risk from 1 to 10.
    pub risk: u32,

    /// Reward from 1 to 10.
    pub reward: u32,
}

/// A directed graph of events connected by decisions.
///
/// Nodes and edges are kept in creation order; lookups go through indexes
/// keyed by node id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecisionGraph {
    nodes: Vec<EventNode>,
    edges: Vec<DecisionEdge>,

    /// Index: node id -> position in `nodes`.
    #[serde(skip)]
    node_index: HashMap<NodeId, usize>,

    /// Adjacency: node id -> positions of its outgoing edges in `edges`.
    #[serde(skip)]
    outgoing: HashMap<NodeId, Vec<usize>>,

    /// Number of incoming edges per node.
    #[serde(skip)]
    incoming: HashMap<NodeId, usize>,
}

impl DecisionGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }

    /// Add a node unless one with the same id exists.
    ///
    /// Returns `false` and leaves the existing description untouched when the
    /// id is already present.
    pub fn add_node(&mut self, id: NodeId, description: impl Into<String>) -> bool {
        if self.node_index.contains_key(&id) {
            return false;
        }
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(EventNode {
            id,
            description: description.into(),
        });
        true
    }

    /// Add an edge between two existing nodes.
    ///
    /// An edge with the same endpoints replaces the previous one, as in a
    /// simple directed graph. Returns `false` if either endpoint is missing.
    #[must_use = "an edge between missing nodes is silently dropped"]
    pub fn add_edge(&mut self, edge: DecisionEdge) -> bool {
        if !self.contains(&edge.from) || !self.contains(&edge.to) {
            return false;
        }

        if let Some(existing) = self.find_edge(&edge.from, &edge.to) {
            self.edges[existing] = edge;
            return true;
        }

        let position = self.edges.len();
        self.outgoing.entry(edge.from.clone()).or_default().push(position);
        *self.incoming.entry(edge.to.clone()).or_default() += 1;
        self.edges.push(edge);
        true
    }

    /// Check if a node exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }

    /// Get a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&EventNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Get the description of a node.
    pub fn description(&self, id: &NodeId) -> Option<&str> {
        self.node(id).map(|n| n.description.as_str())
    }

    /// Get the edge from `from` to `to`.
    pub fn edge(&self, from: &NodeId, to: &NodeId) -> Option<&DecisionEdge> {
        self.find_edge(from, to).map(|i| &self.edges[i])
    }

    fn find_edge(&self, from: &NodeId, to: &NodeId) -> Option<usize> {
        self.outgoing
            .get(from)?
            .iter()
            .copied()
            .find(|&i| &self.edges[i].to == to)
    }

    /// Outgoing edges of a node, in creation order.
    pub fn outgoing_edges(&self, id: &NodeId) -> Vec<&DecisionEdge> {
        self.outgoing
            .get(id)
            .map(|positions| positions.iter().map(|&i| &self.edges[i]).collect())
            .unwrap_or_default()
    }

    /// Direct successors of a node, in creation order.
    pub fn successors(&self, id: &NodeId) -> Vec<&NodeId> {
        self.outgoing_edges(id).into_iter().map(|e| &e.to).collect()
    }

    pub fn out_degree(&self, id: &NodeId) -> usize {
        self.outgoing.get(id).map_or(0, Vec::len)
    }

    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.incoming.get(id).copied().unwrap_or(0)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &EventNode> {
        self.nodes.iter()
    }

    /// All edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &DecisionEdge> {
        self.edges.iter()
    }

    /// Nodes with no outgoing edges.
    pub fn leaves(&self) -> impl Iterator<Item = &EventNode> {
        self.nodes.iter().filter(|n| self.out_degree(&n.id) == 0)
    }

    /// Walk from the root taking left decisions until a leaf.
    ///
    /// A node without a left child continues through its first successor.
    /// An empty graph yields just the root id.
    pub fn leftmost_path(&self) -> Vec<NodeId> {
        let mut current = NodeId::root();
        let mut path = vec![current.clone()];

        loop {
            let successors = self.successors(&current);
            let next = successors
                .iter()
                .find(|id| id.last_branch() == Some(Branch::Left))
                .or_else(|| successors.first());

            match next {
                Some(&next) => {
                    current = next.clone();
                    path.push(current.clone());
                }
                None => break,
            }
        }

        path
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
