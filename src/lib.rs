//! # pano-edges — Navigation Edges for Panoramic Image Graphs
//!
//! Given one image node and its spatial neighbours, decide which neighbours
//! become navigable edges (sequence, step, turn, pano) and with what
//! geometry.
//!
//! ## Design Principles
//!
//! 1. **Pure core**: every `compute_*_edges` is a function of its inputs and
//!    the calculator's immutable tables. No caching, no I/O.
//! 2. **Clean DTOs**: `Node`, `PotentialEdge`, `Edge` cross every boundary
//! 3. **One ranking routine**: every edge kind buckets candidates and picks
//!    winners with its own tie-break cascade
//! 4. **Fail fast**: inconsistent settings are rejected at construction,
//!    malformed features panic instead of producing a wrong edge
//!
//! ## Quick Start
//!
//! ```rust
//! use pano_edges::{EdgeCalculator, EdgeDirection, Node, Pose};
//!
//! # fn example() -> pano_edges::Result<()> {
//! let calculator = EdgeCalculator::default();
//!
//! let node = Node::new("a", Pose::from_yaw([0.0, 0.0, 0.0], 0.0), "seq");
//! let pano = Node::new("b", Pose::from_yaw([5.0, 0.0, 0.0], 1.0), "seq").with_full_pano(true);
//!
//! let potential = calculator.compute_potential_edges(&node, &[pano])?;
//! let edges = calculator.compute_pano_edges(&node, &potential);
//!
//! assert_eq!(edges.len(), 1);
//! assert_eq!(edges[0].direction, EdgeDirection::Pano);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod geo;
pub mod model;
pub mod edge;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, NodeKey, Pose, PotentialEdge, SequenceAdjacency,
    Edge, EdgeData, EdgeDirection, EdgeKind,
};

// ============================================================================
// Re-exports: Calculator
// ============================================================================

pub use edge::{EdgeCalculator, EdgeCalculatorDirections, EdgeCalculatorSettings};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid setting {field}: {message}")]
    InvalidSettings { field: &'static str, message: String },

    #[error("Invalid pose for node {key}: {message}")]
    InvalidPose { key: NodeKey, message: String },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
