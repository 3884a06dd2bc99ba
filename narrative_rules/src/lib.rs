//! # Narrative Rules
//!
//! The "Story Bible" crate - holds the fixed vocabulary a narrative tree is
//! written in: the palette of themes, locations and characters, the
//! contrastive decision pairs, the twist sentences, and the configuration
//! layer. This crate contains no randomness and no graph logic.

pub mod config;
pub mod mechanics;
pub mod palette;

pub use config::*;
pub use mechanics::*;
pub use palette::*;
