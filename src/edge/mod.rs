//! # Edge Calculation
//!
//! | Module | Role |
//! |--------|------|
//! | `settings` | Numeric thresholds |
//! | `directions` | Compass slicing and direction tables |
//! | `potential` | Feature extraction |
//! | `ranking` | Shared bucket + tie-break cascade |
//! | `calculator` | `EdgeCalculator`, the `compute_*_edges` family |

pub mod settings;
pub mod directions;
pub mod potential;
pub(crate) mod ranking;
pub mod calculator;

pub use settings::{EdgeCalculatorSettings, MAX_PANO_ITEMS};
pub use directions::{
    Compass, EdgeCalculatorDirections, SequenceDirection, StepDirection, TurnDirection,
    MIN_COMPASS_SLICES,
};
pub use potential::compute_potential_edges;
pub use calculator::EdgeCalculator;
