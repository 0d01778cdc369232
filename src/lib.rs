//! Skirmish Movement - reachability engine for tactical grid combat

pub mod board;
pub mod core;
pub mod grid;
pub mod movement;
pub mod scenario;
pub mod units;
