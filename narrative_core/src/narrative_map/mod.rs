//! Narrative Map - one narrative session: a palette, a random stream, and the
//! decision tree built from them.
//!
//! Usage follows a fixed order:
//! 1. **Construct**: validate the palette and seed the stream
//! 2. **Build**: `build_tree(depth)` replaces the graph with a complete tree
//! 3. **Query**: `get_path_summary(path)` reads the graph without changing it
//!
//! Choosing a path through the tree is left to the caller.

mod builder;
mod summary;

pub use builder::*;
pub use summary::*;

use narrative_rules::{NarrativeConfig, StoryPalette};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decision_tree::{DecisionGraph, NodeId};
use crate::error::{NarrativeError, Result};
use crate::storyteller::{RandomStream, SeededStream};

/// Unique identifier for narrative sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A binary decision tree of narrative events.
///
/// The map exclusively owns its random stream and its graph. Without a seed
/// the stream is drawn from platform entropy; with one, every build is
/// reproducible bit for bit.
#[derive(Debug)]
pub struct NarrativeMap<S = SeededStream> {
    session_id: SessionId,
    palette: StoryPalette,
    seed: Option<u64>,
    stream: S,
    graph: DecisionGraph,
    last_build: Option<BuildReport>,
}

impl NarrativeMap<SeededStream> {
    /// Create a map from raw palette lists.
    ///
    /// Fails with an invalid-input error if any list is empty.
    pub fn new<T, L, C>(themes: T, locations: L, characters: C, seed: Option<u64>) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let palette = StoryPalette::new(themes, locations, characters)?;
        Ok(Self::from_palette(palette, seed))
    }

    /// Create a map from a validated palette.
    pub fn from_palette(palette: StoryPalette, seed: Option<u64>) -> Self {
        let mut map = Self::with_stream(palette, SeededStream::new(seed));
        map.seed = seed;
        map
    }

    /// Create a map from a loaded configuration.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_palette(config.palette.clone(), config.seed))
    }
}

impl<S: RandomStream> NarrativeMap<S> {
    /// Create a map driven by any random stream.
    pub fn with_stream(palette: StoryPalette, stream: S) -> Self {
        let session_id = SessionId::new();
        tracing::debug!(session = %session_id, "created narrative map");
        Self {
            session_id,
            palette,
            seed: None,
            stream,
            graph: DecisionGraph::new(),
            last_build: None,
        }
    }

    /// Build a complete binary decision tree of `depth` levels below `start`.
    ///
    /// Any previous tree is discarded. A depth of zero, or one whose node
    /// count would overflow `usize`, is rejected before the graph is touched.
    /// Memory is the practical ceiling well below that: every level doubles
    /// the node count.
    pub fn build_tree(&mut self, depth: u32) -> Result<BuildReport> {
        let rejected = if depth < 1 {
            Some(NarrativeError::InvalidDepth(depth))
        } else if expected_node_count(depth).is_none() {
            Some(NarrativeError::DepthTooLarge(depth))
        } else {
            None
        };
        if let Some(error) = rejected {
            tracing::debug!(session = %self.session_id, depth, %error, "rejected tree depth");
            return Err(error);
        }

        tracing::debug!(session = %self.session_id, depth, "building narrative tree");
        let report = TreeBuilder::new(&self.palette, &mut self.stream, &mut self.graph).build(depth);
        tracing::info!(
            session = %self.session_id,
            depth,
            nodes = report.nodes,
            edges = report.edges,
            "built narrative tree"
        );

        self.last_build = Some(report);
        Ok(report)
    }

    /// Summarize a path given as node labels such as `["start", "start_L"]`.
    ///
    /// Labels that do not name a node in the graph, including malformed
    /// ones, are reported as not found.
    pub fn get_path_summary<P: AsRef<str>>(&self, path: &[P]) -> Result<PathSummary> {
        if path.is_empty() {
            return Err(NarrativeError::EmptyPath);
        }

        let ids = path
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                raw.parse::<NodeId>()
                    .ok()
                    .filter(|id| self.graph.contains(id))
                    .ok_or_else(|| NarrativeError::UnknownNode(raw.to_string()))
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| self.log_rejected_query(e))?;

        self.summarize_path(&ids)
    }

    /// Summarize a path of typed node ids.
    pub fn summarize_path(&self, path: &[NodeId]) -> Result<PathSummary> {
        PathSummary::collect(&self.graph, path).map_err(|e| self.log_rejected_query(e))
    }

    fn log_rejected_query(&self, error: NarrativeError) -> NarrativeError {
        tracing::debug!(session = %self.session_id, %error, "rejected path query");
        error
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn palette(&self) -> &StoryPalette {
        &self.palette
    }

    /// The seed the stream was created from, `None` for entropy or custom streams.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn graph(&self) -> &DecisionGraph {
        &self.graph
    }

    /// Report of the most recent successful build.
    pub fn last_build(&self) -> Option<BuildReport> {
        self.last_build
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }
}

impl<S> std::fmt::Display for NarrativeMap<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "narrative map {} ({} nodes, {} edges)",
            self.session_id,
            self.graph.node_count(),
            self.graph.edge_count()
        )
    }
}
