//! Movement cost constants - all tunable values in one place
//!
//! Surcharges are ADDITIVE and stack: a single step pays at most
//! `STEP_COST + DIFFICULT_TERRAIN_SURCHARGE + FIGURE_SURCHARGE`.

// Base cost of any translation (orthogonal or diagonal)
pub const STEP_COST: u32 = 1;

// Entering at least one difficult cell
pub const DIFFICULT_TERRAIN_SURCHARGE: u32 = 1;

// Entering at least one cell occupied by a (hostile) figure
pub const FIGURE_SURCHARGE: u32 = 1;

// Swapping a non-square footprint in place
pub const ROTATION_COST: u32 = 1;

// Longest footprint side accepted from text
pub const MAX_FOOTPRINT_SIDE: u32 = 8;
