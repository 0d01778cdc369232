//! Board topology and the per-query snapshot the movement search runs on

pub mod state;
pub mod terrain;
pub mod topology;

pub use state::{build_board_state, BoardState, FigurePlacement, Occupancy};
pub use terrain::Terrain;
pub use topology::{DoorState, MapTopology};
