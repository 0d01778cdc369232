//! Grid coordinates and their text labels
//!
//! Columns are written as bijective base-26 letters (`a`..`z`, `aa`, `ab`, ...)
//! and rows as 1-based numbers, so column 0 / row 0 is `a1` and column 26 /
//! row 11 is `aa12`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::MovementError;

/// One grid cell, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub col: i32,
    pub row: i32,
}

impl Coordinate {
    /// Returned by [`decode`] for labels that cannot be parsed
    pub const SENTINEL: Coordinate = Coordinate { col: -1, row: -1 };

    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn is_valid(&self) -> bool {
        self.col >= 0 && self.row >= 0
    }

    /// Saturates at the `i32` bounds
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.col.saturating_add(dx), self.row.saturating_add(dy))
    }

    /// The four orthogonal neighbours, in N/E/S/W order
    pub fn orthogonal_neighbors(&self) -> [Coordinate; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.col, self.row))
    }
}

impl FromStr for Coordinate {
    type Err = MovementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coord = decode(s);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(MovementError::InvalidCoordinate(s.to_string()))
        }
    }
}

/// Encode a 0-indexed column/row pair as a label such as `c4`
///
/// Negative inputs have no label; they encode to an empty string.
pub fn encode(col: i32, row: i32) -> String {
    if col < 0 || row < 0 {
        return String::new();
    }

    let mut letters = Vec::new();
    let mut n = col as u64 + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();

    let mut label: String = letters.into_iter().map(char::from).collect();
    label.push_str(&(row as u64 + 1).to_string());
    label
}

/// Decode a label back into a coordinate
///
/// Returns [`Coordinate::SENTINEL`] instead of failing when the label is not
/// letters followed by a positive row number.
pub fn decode(label: &str) -> Coordinate {
    let label = label.trim();
    let split = label
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(label.len());
    let (letters, digits) = label.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Coordinate::SENTINEL;
    }

    let mut col: i64 = 0;
    for b in letters.bytes() {
        let value = (b.to_ascii_lowercase() - b'a') as i64 + 1;
        col = col * 26 + value;
        if col > i32::MAX as i64 {
            return Coordinate::SENTINEL;
        }
    }

    let row: i64 = match digits.parse() {
        Ok(row) if row >= 1 && row <= i32::MAX as i64 => row,
        _ => return Coordinate::SENTINEL,
    };

    Coordinate::new((col - 1) as i32, (row - 1) as i32)
}

/// Order-independent key for a pair of adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey(Coordinate, Coordinate);

impl EdgeKey {
    /// Text form: both labels sorted and joined with `|`
    pub fn label(&self) -> String {
        let mut labels = [self.0.to_string(), self.1.to_string()];
        labels.sort();
        labels.join("|")
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn edge_key(a: Coordinate, b: Coordinate) -> EdgeKey {
    if a <= b {
        EdgeKey(a, b)
    } else {
        EdgeKey(b, a)
    }
}
