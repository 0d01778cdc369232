//! Movement profiles: what a unit's size and traits allow during a search
//!
//! These are game rules, not generic defaults:
//! - diagonal steps only for 1x1 footprints
//! - rotation only for non-square footprints
//! - Massive and Mobile each ignore difficult terrain, blocking spaces and
//!   figure surcharges; only Massive may end on occupied spaces

use serde::{Deserialize, Serialize};

use crate::grid::footprint::FootprintSize;
use crate::units::catalog::UnitCatalog;

pub const MASSIVE_KEYWORD: &str = "massive";
pub const MOBILE_KEYWORD: &str = "mobile";

/// Search-relevant capabilities of one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementProfile {
    /// Current orientation
    pub size: FootprintSize,
    pub cols: u32,
    pub rows: u32,
    pub is_large: bool,
    pub allow_diagonal: bool,
    pub can_rotate: bool,
    pub is_massive: bool,
    pub is_mobile: bool,
    pub ignore_difficult: bool,
    pub ignore_blocking: bool,
    pub ignore_figure_cost: bool,
    pub can_end_on_occupied: bool,
}

impl MovementProfile {
    /// Derive every flag from a footprint and the two movement traits
    pub fn from_traits(size: FootprintSize, is_massive: bool, is_mobile: bool) -> Self {
        let exempt = is_massive || is_mobile;
        Self {
            size,
            cols: size.cols,
            rows: size.rows,
            is_large: size.cell_count() > 1,
            allow_diagonal: size == FootprintSize::SINGLE,
            can_rotate: !size.is_square(),
            is_massive,
            is_mobile,
            ignore_difficult: exempt,
            ignore_blocking: exempt,
            ignore_figure_cost: exempt,
            can_end_on_occupied: is_massive,
        }
    }

    /// Plain 1x1 figure with no traits
    pub fn single() -> Self {
        Self::from_traits(FootprintSize::SINGLE, false, false)
    }

    /// Same traits, different orientation
    pub fn with_size(&self, size: FootprintSize) -> Self {
        Self::from_traits(size, self.is_massive, self.is_mobile)
    }
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self::single()
    }
}

/// Resolve a unit type into its movement profile
///
/// Missing catalog data yields a plain 1x1 profile. A stored orientation is
/// honoured only if it is the base size or its rotation.
pub fn resolve_profile(
    catalog: &UnitCatalog,
    unit_type: &str,
    orientation: Option<FootprintSize>,
) -> MovementProfile {
    let Some(entry) = catalog.get(unit_type) else {
        tracing::warn!("No unit data for {:?}, using a 1x1 profile", unit_type);
        return MovementProfile::single();
    };

    let size = match orientation {
        Some(o) if o == entry.size || o == entry.size.rotated() => o,
        Some(o) => {
            tracing::warn!(
                "Orientation {} does not fit {} ({}), using base size",
                o,
                unit_type,
                entry.size
            );
            entry.size
        }
        None => entry.size,
    };

    MovementProfile::from_traits(
        size,
        entry.has_keyword(MASSIVE_KEYWORD),
        entry.has_keyword(MOBILE_KEYWORD),
    )
}
