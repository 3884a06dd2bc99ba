//! Errors raised by narrative maps.

use narrative_rules::{ConfigError, PaletteError};
use thiserror::Error;

/// Broad classification of a [`NarrativeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something the operation cannot accept.
    InvalidInput,
    /// A referenced node or edge does not exist.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error(transparent)]
    InvalidPalette(#[from] PaletteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("depth must be at least 1, got {0}")]
    InvalidDepth(u32),

    #[error("depth {0} is too large: the tree would not fit in memory")]
    DepthTooLarge(u32),

    #[error("path must contain at least one node")]
    EmptyPath,

    #[error("node '{0}' does not exist in the graph")]
    UnknownNode(String),

    #[error("no edge {from} -> {to} in the graph")]
    MissingEdge { from: String, to: String },
}

impl NarrativeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NarrativeError::InvalidPalette(_)
            | NarrativeError::Config(_)
            | NarrativeError::InvalidDepth(_)
            | NarrativeError::DepthTooLarge(_)
            | NarrativeError::EmptyPath => ErrorKind::InvalidInput,
            NarrativeError::UnknownNode(_) | NarrativeError::MissingEdge { .. } => {
                ErrorKind::NotFound
            }
        }
    }
}

pub type Result<T, E = NarrativeError> = std::result::Result<T, E>;
