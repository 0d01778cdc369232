//! Terrain labels and their movement effects

use serde::{Deserialize, Serialize};

/// Terrain of a single space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    Normal,
    Difficult,
}

impl Terrain {
    /// Map a persisted terrain label; anything unrecognised is normal ground
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("difficult") {
            Terrain::Difficult
        } else {
            Terrain::Normal
        }
    }

    /// Does entering this terrain cost extra movement?
    pub fn is_difficult(&self) -> bool {
        matches!(self, Terrain::Difficult)
    }
}
