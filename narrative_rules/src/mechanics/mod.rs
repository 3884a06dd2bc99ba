//! Narrative mechanics: decision pairs, branch sides, stakes, and event templates.

use serde::{Deserialize, Serialize};

/// Lowest risk or reward an edge can carry.
pub const MIN_STAKE: u32 = 1;

/// Highest risk or reward an edge can carry.
pub const MAX_STAKE: u32 = 10;

/// Probability that an event description gains a twist sentence.
pub const TWIST_PROBABILITY: f64 = 0.5;

/// The side of a binary decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    Left,
    Right,
}

impl Branch {
    /// Both sides in expansion order.
    pub const BOTH: [Branch; 2] = [Branch::Left, Branch::Right];

    /// Suffix letter used in rendered node labels.
    pub fn letter(&self) -> char {
        match self {
            Branch::Left => 'L',
            Branch::Right => 'R',
        }
    }

    /// Parse a suffix letter.
    pub fn from_letter(letter: char) -> Option<Branch> {
        match letter {
            'L' => Some(Branch::Left),
            'R' => Some(Branch::Right),
            _ => None,
        }
    }
}

/// A contrastive pair of mutually exclusive choices offered at one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DecisionPair {
    pub left: &'static str,
    pub right: &'static str,
}

impl DecisionPair {
    pub const fn new(left: &'static str, right: &'static str) -> Self {
        Self { left, right }
    }

    /// The label for one side of the pair.
    pub fn label(&self, branch: Branch) -> &'static str {
        match branch {
            Branch::Left => self.left,
            Branch::Right => self.right,
        }
    }

    /// Check if a label belongs to this pair.
    pub fn contains(&self, label: &str) -> bool {
        self.left == label || self.right == label
    }
}

/// The fixed cycle of decision pairs, consumed one per node expansion.
pub const DECISION_PAIRS: [DecisionPair; 5] = [
    DecisionPair::new("trust", "betray"),
    DecisionPair::new("flee", "confront"),
    DecisionPair::new("open", "slam shut"),
    DecisionPair::new("stay silent", "reveal"),
    DecisionPair::new("sacrifice", "save"),
];

/// The pair used by the `n`-th expansion of a build.
pub fn decision_pair(expansion: usize) -> DecisionPair {
    DECISION_PAIRS[expansion % DECISION_PAIRS.len()]
}

/// Find the pair a label belongs to.
pub fn pair_for_label(label: &str) -> Option<DecisionPair> {
    DECISION_PAIRS.iter().copied().find(|pair| pair.contains(label))
}

/// Optional closing sentences that bend an event.
pub const TWISTS: [&str; 3] = [
    "An oath from the past suddenly weighs more than the present.",
    "The shadow of intent stretches further than memory allows.",
    "Between silence and truth a tremor appears that changes the course of events.",
];

/// First sentence of every event: where, who, and which theme returns.
pub fn scene_sentence(location: &str, character: &str, theme: &str) -> String {
    format!(
        "In {}, {} confronts the theme of '{}', which returns like an echo of earlier choices.",
        location, character, theme
    )
}

/// Second sentence of every event, anchored to the node label.
pub fn node_sentence(node_label: &str) -> String {
    format!(
        "Node {} reveals a hidden dependency: the way forward demands a price no one has named yet.",
        node_label
    )
}
