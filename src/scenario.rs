//! Scenario files: a map, a unit table, and figures placed on it
//!
//! ```toml
//! open_doors = [["c2", "d2"]]
//!
//! [map]
//! grid = "6x4"
//! blocked = ["b3"]
//! walls = [["c1", "d1"]]
//! doors = [["c2", "d2"]]
//!
//! [map.terrain]
//! e2 = "difficult"
//!
//! [units.rancor]
//! size = "2x2"
//! keywords = ["Massive"]
//!
//! [[figures]]
//! name = "hero"
//! unit = "trooper"
//! at = "a1"
//!
//! [[figures]]
//! name = "beast"
//! unit = "rancor"
//! at = "e3"
//! side = "hostile"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::board::state::{build_board_state, BoardState, FigurePlacement, Occupancy};
use crate::board::topology::{DoorState, MapTopology};
use crate::core::error::{MovementError, Result};
use crate::grid::coord::Coordinate;
use crate::grid::footprint::FootprintSize;
use crate::units::catalog::{UnitCatalog, UnitEntry};
use crate::units::profile::{resolve_profile, MovementProfile};

/// Map section: an optional rectangle generator plus explicit topology
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Generate a fully connected `WxH` rectangle before applying the rest
    pub grid: Option<FootprintSize>,
    #[serde(flatten)]
    pub topology: MapTopology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Allied,
    Hostile,
}

/// One figure on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    pub name: String,
    pub unit: String,
    /// Top-left label
    pub at: String,
    #[serde(default)]
    pub side: Side,
    /// Stored orientation from an earlier rotation
    #[serde(default)]
    pub orientation: Option<FootprintSize>,
}

/// Complete scenario file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub map: MapConfig,
    pub open_doors: Vec<[String; 2]>,
    pub units: BTreeMap<String, UnitEntry>,
    pub figures: Vec<FigureConfig>,
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load and validate a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&contents)?;
        scenario.validate()?;
        tracing::debug!(
            "Loaded scenario {:?} with {} figures",
            path,
            scenario.figures.len()
        );
        Ok(scenario)
    }

    /// Every figure must name a listed unit type and a valid top-left label
    pub fn validate(&self) -> Result<()> {
        let catalog = self.catalog();
        for figure in &self.figures {
            catalog.require(&figure.unit)?;
            figure.at.parse::<Coordinate>()?;
        }
        Ok(())
    }

    /// Static topology with the grid generator applied
    pub fn topology(&self) -> MapTopology {
        let explicit = &self.map.topology;
        let Some(size) = self.map.grid else {
            return explicit.clone();
        };

        let mut topology = MapTopology::grid(size.cols, size.rows);
        for space in &explicit.spaces {
            if !topology.spaces.contains(space) {
                topology.spaces.push(space.clone());
            }
        }
        for (space, neighbors) in &explicit.adjacency {
            topology.adjacency.insert(space.clone(), neighbors.clone());
        }
        topology.terrain.extend(explicit.terrain.clone());
        topology.blocked.extend(explicit.blocked.iter().cloned());
        for [a, b] in &explicit.walls {
            topology.add_wall(a, b);
        }
        topology.doors.extend(explicit.doors.iter().cloned());
        topology
    }

    pub fn doors(&self) -> DoorState {
        DoorState {
            open: self.open_doors.clone(),
        }
    }

    pub fn catalog(&self) -> UnitCatalog {
        let mut catalog = UnitCatalog::new();
        for (name, entry) in &self.units {
            catalog.insert(name, entry.clone());
        }
        catalog
    }

    pub fn figure(&self, name: &str) -> Result<&FigureConfig> {
        self.figures
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| MovementError::UnknownFigure(name.to_string()))
    }

    pub fn start_for(&self, name: &str) -> Result<Coordinate> {
        self.figure(name)?.at.parse()
    }

    pub fn profile_for(&self, name: &str) -> Result<MovementProfile> {
        let figure = self.figure(name)?;
        Ok(resolve_profile(&self.catalog(), &figure.unit, figure.orientation))
    }

    /// Every other figure, split by whether it is on `name`'s side
    pub fn occupancy_excluding(&self, name: &str) -> Result<Occupancy> {
        let mover = self.figure(name)?;
        let catalog = self.catalog();
        let mut allied = Vec::new();
        let mut hostile = Vec::new();

        for figure in self.figures.iter().filter(|f| f.name != mover.name) {
            let size = resolve_profile(&catalog, &figure.unit, figure.orientation).size;
            let placement = FigurePlacement::new(figure.at.parse()?, size);
            if figure.side == mover.side {
                allied.push(placement);
            } else {
                hostile.push(placement);
            }
        }

        Ok(Occupancy::Sided { allied, hostile })
    }

    /// Board snapshot as seen by the named figure
    pub fn board_for(&self, name: &str) -> Result<BoardState> {
        let occupancy = self.occupancy_excluding(name)?;
        Ok(build_board_state(&self.topology(), &self.doors(), &occupancy))
    }
}
