//! Unit footprints: sizes written as `WxH` and the cells they cover

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::MAX_FOOTPRINT_SIDE;
use crate::core::error::MovementError;
use crate::grid::coord::{decode, Coordinate};

/// Footprint dimensions, `cols` wide and `rows` tall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FootprintSize {
    pub cols: u32,
    pub rows: u32,
}

impl FootprintSize {
    pub const SINGLE: FootprintSize = FootprintSize { cols: 1, rows: 1 };

    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Parse `WxH`, falling back to 1x1 for anything unparseable
    pub fn parse_or_single(s: &str) -> Self {
        s.parse().unwrap_or(Self::SINGLE)
    }

    pub fn is_square(&self) -> bool {
        self.cols == self.rows
    }

    pub fn cell_count(&self) -> u32 {
        self.cols.saturating_mul(self.rows)
    }

    /// Swap cols and rows; square sizes are returned unchanged
    pub fn rotated(&self) -> Self {
        if self.is_square() {
            *self
        } else {
            Self::new(self.rows, self.cols)
        }
    }
}

impl Default for FootprintSize {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Display for FootprintSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

impl FromStr for FootprintSize {
    type Err = MovementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MovementError::InvalidSize(s.to_string());
        let (cols, rows) = s
            .trim()
            .to_ascii_lowercase()
            .split_once('x')
            .map(|(c, r)| (c.trim().parse::<u32>(), r.trim().parse::<u32>()))
            .ok_or_else(invalid)?;

        match (cols, rows) {
            (Ok(cols), Ok(rows))
                if (1..=MAX_FOOTPRINT_SIDE).contains(&cols)
                    && (1..=MAX_FOOTPRINT_SIDE).contains(&rows) =>
            {
                Ok(Self::new(cols, rows))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for FootprintSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FootprintSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Every cell covered by a footprint anchored at `top_left`, row-major
pub fn footprint_cells(top_left: Coordinate, size: FootprintSize) -> Vec<Coordinate> {
    let mut cells = Vec::with_capacity(size.cell_count() as usize);
    for dy in 0..size.rows as i32 {
        for dx in 0..size.cols as i32 {
            cells.push(top_left.offset(dx, dy));
        }
    }
    cells
}

/// Label-level footprint expansion
///
/// An unparseable `top_left` degenerately yields just `[top_left]`; an
/// unparseable size is treated as 1x1.
pub fn footprint_labels(top_left: &str, size: &str) -> Vec<String> {
    let anchor = decode(top_left);
    if !anchor.is_valid() {
        return vec![top_left.to_string()];
    }

    footprint_cells(anchor, FootprintSize::parse_or_single(size))
        .iter()
        .map(Coordinate::to_string)
        .collect()
}
