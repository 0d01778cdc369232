//! Per-query board snapshot
//!
//! A [`BoardState`] is rebuilt from the static topology plus live door and
//! figure positions for every movement query. Building never touches shared
//! state, so snapshots can be produced freely on any thread.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::board::terrain::Terrain;
use crate::board::topology::{DoorState, MapTopology};
use crate::grid::coord::{decode, edge_key, Coordinate, EdgeKey};
use crate::grid::footprint::{footprint_cells, FootprintSize};

/// A figure's current anchor and footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigurePlacement {
    pub at: Coordinate,
    pub size: FootprintSize,
}

impl FigurePlacement {
    pub fn new(at: Coordinate, size: FootprintSize) -> Self {
        Self { at, size }
    }

    /// Lenient label form; bad sizes fall back to 1x1
    pub fn from_labels(at: &str, size: &str) -> Self {
        Self::new(decode(at), FootprintSize::parse_or_single(size))
    }

    pub fn cells(&self) -> Vec<Coordinate> {
        footprint_cells(self.at, self.size)
    }
}

/// Live figure positions, excluding the figure that is moving
#[derive(Debug, Clone, PartialEq)]
pub enum Occupancy {
    /// No side information: every figure counts for movement surcharges
    Unsided(Vec<FigurePlacement>),
    /// Partitioned into the mover's side and the opposing side
    Sided {
        allied: Vec<FigurePlacement>,
        hostile: Vec<FigurePlacement>,
    },
}

impl Default for Occupancy {
    fn default() -> Self {
        Occupancy::Unsided(Vec::new())
    }
}

impl Occupancy {
    fn occupied_cells(&self) -> AHashSet<Coordinate> {
        match self {
            Occupancy::Unsided(figures) => {
                figures.iter().flat_map(FigurePlacement::cells).collect()
            }
            Occupancy::Sided { allied, hostile } => allied
                .iter()
                .chain(hostile)
                .flat_map(FigurePlacement::cells)
                .collect(),
        }
    }

    fn hostile_cells(&self) -> Option<AHashSet<Coordinate>> {
        match self {
            Occupancy::Unsided(_) => None,
            Occupancy::Sided { hostile, .. } => {
                Some(hostile.iter().flat_map(FigurePlacement::cells).collect())
            }
        }
    }
}

/// Immutable snapshot of everything the movement search reads
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub spaces: AHashSet<Coordinate>,
    pub adjacency: AHashMap<Coordinate, AHashSet<Coordinate>>,
    pub terrain: AHashMap<Coordinate, Terrain>,
    pub blocking: AHashSet<Coordinate>,
    /// Walls plus closed doors
    pub movement_blocking: AHashSet<EdgeKey>,
    pub occupied: AHashSet<Coordinate>,
    /// Only present when occupancy was partitioned by side
    pub hostile_occupied: Option<AHashSet<Coordinate>>,
}

/// Build a board snapshot from static topology and live state
pub fn build_board_state(
    topology: &MapTopology,
    doors: &DoorState,
    occupancy: &Occupancy,
) -> BoardState {
    let spaces: AHashSet<Coordinate> = topology
        .spaces
        .iter()
        .filter_map(|s| parse_label(s))
        .collect();

    let adjacency: AHashMap<Coordinate, AHashSet<Coordinate>> = topology
        .adjacency
        .iter()
        .filter_map(|(space, neighbors)| {
            let space = parse_label(space)?;
            let neighbors: AHashSet<Coordinate> =
                neighbors.iter().filter_map(|n| parse_label(n)).collect();
            Some((space, neighbors))
        })
        .collect();

    let terrain: AHashMap<Coordinate, Terrain> = topology
        .terrain
        .iter()
        .filter_map(|(space, label)| Some((parse_label(space)?, Terrain::from_label(label))))
        .collect();

    let blocking: AHashSet<Coordinate> = topology
        .blocked
        .iter()
        .filter_map(|s| parse_label(s))
        .collect();

    let open_doors: AHashSet<EdgeKey> = doors.open.iter().filter_map(parse_edge).collect();
    let mut movement_blocking: AHashSet<EdgeKey> =
        topology.walls.iter().filter_map(parse_edge).collect();
    movement_blocking.extend(
        topology
            .doors
            .iter()
            .filter_map(parse_edge)
            .filter(|edge| !open_doors.contains(edge)),
    );

    let board = BoardState {
        spaces,
        adjacency,
        terrain,
        blocking,
        movement_blocking,
        occupied: occupancy.occupied_cells(),
        hostile_occupied: occupancy.hostile_cells(),
    };

    tracing::debug!(
        spaces = board.spaces.len(),
        blocking = board.blocking.len(),
        blocked_edges = board.movement_blocking.len(),
        occupied = board.occupied.len(),
        "Built board state"
    );

    board
}

fn parse_label(label: &str) -> Option<Coordinate> {
    let coord = decode(label);
    if coord.is_valid() {
        Some(coord)
    } else {
        tracing::warn!("Ignoring malformed space label {:?} in map topology", label);
        None
    }
}

fn parse_edge(pair: &[String; 2]) -> Option<EdgeKey> {
    Some(edge_key(parse_label(&pair[0])?, parse_label(&pair[1])?))
}

impl BoardState {
    /// Same static topology, different live figure positions
    pub fn with_occupancy(&self, occupancy: &Occupancy) -> BoardState {
        BoardState {
            occupied: occupancy.occupied_cells(),
            hostile_occupied: occupancy.hostile_cells(),
            ..self.clone()
        }
    }

    pub fn contains_space(&self, coord: Coordinate) -> bool {
        self.spaces.contains(&coord)
    }

    pub fn is_blocking(&self, coord: Coordinate) -> bool {
        self.blocking.contains(&coord)
    }

    pub fn is_difficult(&self, coord: Coordinate) -> bool {
        self.terrain.get(&coord).is_some_and(Terrain::is_difficult)
    }

    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        self.occupied.contains(&coord)
    }

    /// Is `b` listed as a neighbour of `a`?
    pub fn is_adjacent(&self, a: Coordinate, b: Coordinate) -> bool {
        self.adjacency.get(&a).is_some_and(|neighbors| neighbors.contains(&b))
    }

    pub fn is_edge_blocked(&self, a: Coordinate, b: Coordinate) -> bool {
        self.movement_blocking.contains(&edge_key(a, b))
    }

    /// Cells whose figures make entering them cost extra
    ///
    /// Hostile figures only when sides are known, otherwise every figure.
    pub fn figure_cost_cells(&self) -> &AHashSet<Coordinate> {
        self.hostile_occupied.as_ref().unwrap_or(&self.occupied)
    }
}
