//! Static per-unit-type reference data loaded from TOML
//!
//! The table is read-only once loaded; profile resolution only ever borrows
//! it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{MovementError, Result};
use crate::grid::footprint::FootprintSize;

/// Base footprint and trait keywords for one unit type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    #[serde(default)]
    pub size: FootprintSize,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl UnitEntry {
    pub fn new(size: FootprintSize, keywords: &[&str]) -> Self {
        Self {
            size,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| k.trim().eq_ignore_ascii_case(keyword))
    }
}

/// Unit-type lookup table, keys matched case-insensitively
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitCatalog {
    #[serde(default)]
    pub units: AHashMap<String, UnitEntry>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from TOML text (`[units.<name>]` tables)
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: UnitCatalog = toml::from_str(contents)?;
        let mut catalog = Self::new();
        for (name, entry) in raw.units {
            catalog.insert(&name, entry);
        }
        Ok(catalog)
    }

    /// Load a catalog from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded {} unit types from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn insert(&mut self, unit_type: &str, entry: UnitEntry) {
        self.units.insert(normalize(unit_type), entry);
    }

    pub fn get(&self, unit_type: &str) -> Option<&UnitEntry> {
        self.units.get(&normalize(unit_type))
    }

    /// Like [`get`](Self::get), but a missing entry is an error
    pub fn require(&self, unit_type: &str) -> Result<&UnitEntry> {
        self.get(unit_type)
            .ok_or_else(|| MovementError::UnknownUnitType(unit_type.to_string()))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn normalize(unit_type: &str) -> String {
    unit_type.trim().to_lowercase()
}
