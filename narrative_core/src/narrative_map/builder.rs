//! Breadth-first tree builder.

use narrative_rules::{decision_pair, Branch, StoryPalette, MAX_STAKE, MIN_STAKE};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::decision_tree::{DecisionEdge, DecisionGraph, NodeId};
use crate::storyteller::{describe_event, RandomStream};

/// What a build produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub depth: u32,
    pub nodes: usize,
    pub edges: usize,
    /// Number of internal nodes expanded, one decision pair each.
    pub expansions: usize,
}

/// Node count of a complete binary tree of `depth`, `None` if it overflows.
pub fn expected_node_count(depth: u32) -> Option<usize> {
    2usize.checked_pow(depth.checked_add(1)?).map(|n| n - 1)
}

/// Edge count of a complete binary tree of `depth`, `None` if it overflows.
pub fn expected_edge_count(depth: u32) -> Option<usize> {
    expected_node_count(depth).map(|n| n - 1)
}

/// One build invocation.
///
/// Owns the decision-pair cursor for the duration of the build, so the
/// cycle restarts on every rebuild and never leaks into the long-lived map.
pub(crate) struct TreeBuilder<'a, S: ?Sized> {
    palette: &'a StoryPalette,
    stream: &'a mut S,
    graph: &'a mut DecisionGraph,
    expansions: usize,
}

impl<'a, S> TreeBuilder<'a, S>
where
    S: RandomStream + ?Sized,
{
    pub(crate) fn new(
        palette: &'a StoryPalette,
        stream: &'a mut S,
        graph: &'a mut DecisionGraph,
    ) -> Self {
        Self {
            palette,
            stream,
            graph,
            expansions: 0,
        }
    }

    /// Replace the graph with a complete binary tree of `depth >= 1`.
    ///
    /// # Algorithm
    ///
    /// 1. Clear the graph and create the root event
    /// 2. Pop `(node, level)` from a FIFO queue seeded with `(start, 0)`
    /// 3. Nodes at `level >= depth` are leaves
    /// 4. Otherwise create both children (left first), take the next
    ///    decision pair, draw left risk, left reward, right risk, right
    ///    reward, and add both edges
    /// 5. Enqueue the children while `level + 1 < depth`
    pub(crate) fn build(mut self, depth: u32) -> BuildReport {
        self.graph.clear();

        let root = NodeId::root();
        self.add_event(&root);

        let mut queue = VecDeque::from([(root, 0u32)]);

        while let Some((node, level)) = queue.pop_front() {
            if level >= depth {
                continue;
            }

            let [left, right] = self.expand(&node);

            if level + 1 < depth {
                queue.push_back((left, level + 1));
                queue.push_back((right, level + 1));
            }
        }

        BuildReport {
            depth,
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            expansions: self.expansions,
        }
    }

    fn add_event(&mut self, id: &NodeId) {
        if self.graph.contains(id) {
            return;
        }
        let description = describe_event(&mut *self.stream, self.palette, id);
        self.graph.add_node(id.clone(), description);
    }

    fn expand(&mut self, node: &NodeId) -> [NodeId; 2] {
        let children = node.children();
        for child in &children {
            self.add_event(child);
        }

        let pair = decision_pair(self.expansions);
        self.expansions += 1;

        // Draw order is fixed: left risk, left reward, right risk, right reward.
        let stakes = Branch::BOTH.map(|_| {
            let risk = self.stream.roll(MIN_STAKE, MAX_STAKE);
            let reward = self.stream.roll(MIN_STAKE, MAX_STAKE);
            (risk, reward)
        });

        for ((branch, child), (risk, reward)) in Branch::BOTH.iter().zip(&children).zip(stakes) {
            let added = self.graph.add_edge(DecisionEdge {
                from: node.clone(),
                to: child.clone(),
                choice: pair.label(*branch).to_string(),
                risk,
                reward,
            });
            debug_assert!(added, "edge {node} -> {child} added before its endpoints");
        }

        tracing::trace!(node = %node, choice = ?pair, "expanded node");

        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storyteller::ScriptedStream;
    use narrative_rules::DECISION_PAIRS;

    fn palette() -> StoryPalette {
        StoryPalette::new(["mystery"], ["castle"], ["wanderer"]).unwrap()
    }

    #[test]
    fn test_expected_counts() {
        assert_eq!(expected_node_count(1), Some(3));
        assert_eq!(expected_node_count(3), Some(15));
        assert_eq!(expected_edge_count(3), Some(14));
        assert_eq!(expected_node_count(200), None);
        assert_eq!(expected_node_count(u32::MAX), None);
    }

    #[test]
    fn test_build_depth_one() {
        let palette = palette();
        let mut graph = DecisionGraph::new();
        let mut stream = ScriptedStream::constant(0.0);

        let report = TreeBuilder::new(&palette, &mut stream, &mut graph).build(1);

        assert_eq!(
            report,
            BuildReport {
                depth: 1,
                nodes: 3,
                edges: 2,
                expansions: 1
            }
        );
        let root = NodeId::root();
        let [left, right] = root.children();
        assert_eq!(graph.edge(&root, &left).unwrap().choice, "trust");
        assert_eq!(graph.edge(&root, &right).unwrap().choice, "betray");
    }

    #[test]
    fn test_draw_count() {
        let palette = palette();
        let mut graph = DecisionGraph::new();
        // coin of 0.9 never adds a twist: 4 draws per event
        let mut stream = ScriptedStream::constant(0.9);

        TreeBuilder::new(&palette, &mut stream, &mut graph).build(1);

        // 3 events * 4 draws + 4 stake draws
        assert_eq!(stream.draws(), 16);
    }

    #[test]
    fn test_stakes_follow_draw_order() {
        let palette = palette();
        let mut graph = DecisionGraph::new();
        // three events of five draws each (twist on), then the four stakes
        let mut script = vec![0.0; 15];
        script.extend([0.05, 0.15, 0.25, 0.95]);
        let mut stream = ScriptedStream::new(script);

        TreeBuilder::new(&palette, &mut stream, &mut graph).build(1);

        let root = NodeId::root();
        let [left, right] = root.children();
        let left_edge = graph.edge(&root, &left).unwrap();
        let right_edge = graph.edge(&root, &right).unwrap();
        assert_eq!((left_edge.risk, left_edge.reward), (1, 2));
        assert_eq!((right_edge.risk, right_edge.reward), (3, 10));
    }

    #[test]
    fn test_pairs_cycle_in_breadth_first_order() {
        let palette = palette();
        let mut graph = DecisionGraph::new();
        let mut stream = ScriptedStream::constant(0.3);

        let report = TreeBuilder::new(&palette, &mut stream, &mut graph).build(3);
        assert_eq!(report.expansions, 7);

        let expanded = [
            "start", "start_L", "start_R", "start_L_L", "start_L_R", "start_R_L", "start_R_R",
        ];
        for (i, label) in expanded.iter().enumerate() {
            let node: NodeId = label.parse().unwrap();
            let expected = DECISION_PAIRS[i % DECISION_PAIRS.len()];
            let [left, right] = node.children();
            assert_eq!(graph.edge(&node, &left).unwrap().choice, expected.left);
            assert_eq!(graph.edge(&node, &right).unwrap().choice, expected.right);
        }
    }

    #[test]
    fn test_nodes_created_breadth_first() {
        let palette = palette();
        let mut graph = DecisionGraph::new();
        let mut stream = ScriptedStream::constant(0.3);

        TreeBuilder::new(&palette, &mut stream, &mut graph).build(2);

        let order: Vec<_> = graph.nodes().map(|n| n.id.to_string()).collect();
        assert_eq!(
            order,
            vec!["start", "start_L", "start_R", "start_L_L", "start_L_R", "start_R_L", "start_R_R"]
        );
    }

    #[test]
    fn test_rebuild_replaces_graph() {
        let palette = palette();
        let mut graph = DecisionGraph::new();
        let mut stream = ScriptedStream::constant(0.3);

        TreeBuilder::new(&palette, &mut stream, &mut graph).build(3);
        let report = TreeBuilder::new(&palette, &mut stream, &mut graph).build(1);

        assert_eq!(report.nodes, 3);
        assert_eq!(graph.node_count(), 3);
        assert!(!graph.contains(&"start_L_L".parse().unwrap()));
        // the pair cycle restarts with every build
        let root = NodeId::root();
        assert_eq!(graph.edge(&root, &root.children()[0]).unwrap().choice, "trust");
    }
}
