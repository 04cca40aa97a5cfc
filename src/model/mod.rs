//! # Navigation Graph Model
//!
//! Plain data shared by feature extraction, the edge calculator and the
//! graph layer that consumes its output.
//!
//! Design rule: no I/O, no state, no caching. The calculator only reads these.

pub mod node;
pub mod edge;
pub mod potential_edge;

pub use node::{Node, NodeKey, Pose};
pub use edge::{Edge, EdgeData, EdgeDirection, EdgeKind};
pub use potential_edge::{PotentialEdge, SequenceAdjacency};
