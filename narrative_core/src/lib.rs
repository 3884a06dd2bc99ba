//! # Narrative Core (The Cortex)
//!
//! Builds deterministic narrative decision trees and answers questions about
//! paths through them. The vocabulary (palettes, decision pairs, templates)
//! comes from `narrative_rules`.
//!
//! ## Core Components
//!
//! - **decision_tree**: The directed graph of events and decisions, keyed by path labels
//! - **storyteller**: Random streams and the event-description generator
//! - **narrative_map**: Sessions that build trees breadth-first and summarize paths
//! - **error**: Error type shared by every operation
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: A seed and a depth fully determine a tree
//! - **Injectable Randomness**: Every draw goes through a `RandomStream`
//! - **Read-only Queries**: Summaries never touch the graph

pub mod decision_tree;
pub mod error;
pub mod narrative_map;
pub mod storyteller;

pub use decision_tree::*;
pub use error::*;
pub use narrative_map::*;
pub use storyteller::*;
