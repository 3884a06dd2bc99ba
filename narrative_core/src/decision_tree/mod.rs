//! Decision tree module - the graph store behind a narrative map.
//!
//! The graph consists of:
//! - **Nodes**: Narrative events, identified by their branch path from `start`
//! - **Edges**: Decisions carrying a choice label, a risk, and a reward

mod graph;
mod node_id;

pub use graph::*;
pub use node_id::*;
