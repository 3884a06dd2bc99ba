//! Path summaries - aggregates of the events and decisions along a path.

use serde::{Deserialize, Serialize};

use crate::decision_tree::{DecisionGraph, NodeId};
use crate::error::{NarrativeError, Result};

/// What a walk along a path amounts to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSummary {
    /// Descriptions of every node on the path, in order.
    pub events: Vec<String>,

    /// Choice labels of every edge on the path, in order.
    pub choices: Vec<String>,

    pub total_risk: u32,
    pub total_reward: u32,

    /// Number of edges walked: `path.len() - 1`.
    pub n_steps: usize,
}

impl PathSummary {
    /// Summarize `path` over `graph`.
    ///
    /// Every node is checked for existence before any edge is looked at.
    pub(crate) fn collect(graph: &DecisionGraph, path: &[NodeId]) -> Result<Self> {
        if path.is_empty() {
            return Err(NarrativeError::EmptyPath);
        }

        let events = path
            .iter()
            .map(|id| {
                graph
                    .description(id)
                    .map(str::to_string)
                    .ok_or_else(|| NarrativeError::UnknownNode(id.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut summary = PathSummary {
            events,
            n_steps: path.len() - 1,
            ..Default::default()
        };

        for step in path.windows(2) {
            let (from, to) = (&step[0], &step[1]);
            let edge = graph
                .edge(from, to)
                .ok_or_else(|| NarrativeError::MissingEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                })?;

            summary.choices.push(edge.choice.clone());
            summary.total_risk += edge.risk;
            summary.total_reward += edge.reward;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_tree::DecisionEdge;
    use crate::error::ErrorKind;

    fn chain() -> (DecisionGraph, Vec<NodeId>) {
        let mut graph = DecisionGraph::new();
        let root = NodeId::root();
        let [left, right] = root.children();
        let left_left = left.children()[0].clone();

        for (id, text) in [(&root, "gate"), (&left, "hall"), (&right, "moat"), (&left_left, "vault")] {
            graph.add_node(id.clone(), text);
        }
        for (from, to, choice, risk, reward) in [
            (&root, &left, "trust", 2, 9),
            (&root, &right, "betray", 8, 1),
            (&left, &left_left, "flee", 4, 3),
        ] {
            assert!(graph.add_edge(DecisionEdge {
                from: from.clone(),
                to: to.clone(),
                choice: choice.to_string(),
                risk,
                reward,
            }));
        }

        (graph, vec![root, left, left_left])
    }

    #[test]
    fn test_full_path() {
        let (graph, path) = chain();

        let summary = PathSummary::collect(&graph, &path).unwrap();

        assert_eq!(summary.events, vec!["gate", "hall", "vault"]);
        assert_eq!(summary.choices, vec!["trust", "flee"]);
        assert_eq!(summary.total_risk, 6);
        assert_eq!(summary.total_reward, 12);
        assert_eq!(summary.n_steps, 2);
    }

    #[test]
    fn test_single_node_path() {
        let (graph, _) = chain();

        let summary = PathSummary::collect(&graph, &[NodeId::root()]).unwrap();

        assert_eq!(summary.events, vec!["gate"]);
        assert!(summary.choices.is_empty());
        assert_eq!((summary.total_risk, summary.total_reward, summary.n_steps), (0, 0, 0));
    }

    #[test]
    fn test_empty_path() {
        let (graph, _) = chain();
        let err = PathSummary::collect(&graph, &[]).unwrap_err();
        assert_eq!(err, NarrativeError::EmptyPath);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unknown_node_reported_before_edges() {
        let (graph, mut path) = chain();
        // reversed prefix would be a missing edge, but the unknown node wins
        path.swap(0, 1);
        path.push("start_R_R".parse().unwrap());

        let err = PathSummary::collect(&graph, &path).unwrap_err();
        assert_eq!(err, NarrativeError::UnknownNode("start_R_R".to_string()));
    }

    #[test]
    fn test_reversed_and_skipping_paths() {
        let (graph, path) = chain();

        let reversed: Vec<_> = path.iter().rev().cloned().collect();
        let err = PathSummary::collect(&graph, &reversed).unwrap_err();
        assert_eq!(
            err,
            NarrativeError::MissingEdge {
                from: "start_L_L".to_string(),
                to: "start_L".to_string()
            }
        );

        let skipping = vec![path[0].clone(), path[2].clone()];
        let err = PathSummary::collect(&graph, &skipping).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_summary_json_keys() {
        let (graph, path) = chain();
        let summary = PathSummary::collect(&graph, &path).unwrap();

        let value = serde_json::to_value(&summary).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(keys, vec!["choices", "events", "n_steps", "total_reward", "total_risk"]);
        assert_eq!(value["total_risk"], 6);
    }
}
