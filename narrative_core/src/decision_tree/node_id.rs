//! Node identifiers - the path of branches from the root to a node.

use narrative_rules::Branch;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Rendered label of the root node.
pub const ROOT_LABEL: &str = "start";

/// Error raised when a string is not a valid node label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a node label")]
pub struct NodeIdParseError(pub String);

/// Identity of a node: the sequence of branches taken from the root.
///
/// Renders as `start` followed by `_L` / `_R` per branch, e.g. `start_L_R`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId {
    branches: Vec<Branch>,
}

impl NodeId {
    /// The root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build an id from an explicit branch sequence.
    pub fn from_branches(branches: impl IntoIterator<Item = Branch>) -> Self {
        Self {
            branches: branches.into_iter().collect(),
        }
    }

    /// The child reached by taking `branch`.
    pub fn child(&self, branch: Branch) -> Self {
        let mut branches = Vec::with_capacity(self.branches.len() + 1);
        branches.extend_from_slice(&self.branches);
        branches.push(branch);
        Self { branches }
    }

    /// Both children, left first.
    pub fn children(&self) -> [NodeId; 2] {
        Branch::BOTH.map(|branch| self.child(branch))
    }

    /// The parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        let (_, init) = self.branches.split_last()?;
        Some(Self {
            branches: init.to_vec(),
        })
    }

    /// Number of edges between the root and this node.
    pub fn level(&self) -> usize {
        self.branches.len()
    }

    pub fn is_root(&self) -> bool {
        self.branches.is_empty()
    }

    /// The branch that led into this node.
    pub fn last_branch(&self) -> Option<Branch> {
        self.branches.last().copied()
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(ROOT_LABEL)?;
        for branch in &self.branches {
            write!(f, "_{}", branch.letter())?;
        }
        Ok(())
    }
}

impl FromStr for NodeId {
    type Err = NodeIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NodeIdParseError(s.to_string());

        let rest = s.strip_prefix(ROOT_LABEL).ok_or_else(invalid)?;
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let rest = rest.strip_prefix('_').ok_or_else(invalid)?;
        let branches = rest
            .split('_')
            .map(|segment| {
                let mut chars = segment.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => Branch::from_letter(letter).ok_or_else(invalid),
                    _ => Err(invalid()),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { branches })
    }
}

impl Serialize for NodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
