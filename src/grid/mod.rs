//! Square-grid coordinate system
//!
//! Text labels, footprints, and the canonical keys used for edge lookups.

pub mod coord;
pub mod footprint;

pub use coord::{decode, edge_key, encode, Coordinate, EdgeKey};
pub use footprint::{footprint_cells, footprint_labels, FootprintSize};
