//! Static map topology as persisted per map
//!
//! Everything here is keyed by text labels exactly as stored; normalization
//! into typed coordinates happens when a [`BoardState`](super::BoardState)
//! is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::grid::coord::{encode, Coordinate};

/// Passable spaces, their neighbours, terrain, and static obstacles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapTopology {
    pub spaces: Vec<String>,
    /// Orthogonal neighbours of each space
    pub adjacency: BTreeMap<String, Vec<String>>,
    pub terrain: BTreeMap<String, String>,
    /// Spaces nothing may enter or pass through
    pub blocked: Vec<String>,
    /// Space pairs separated by a wall
    pub walls: Vec<[String; 2]>,
    /// Space pairs separated by a door (impassable while closed)
    pub doors: Vec<[String; 2]>,
}

impl MapTopology {
    /// A fully connected `cols` x `rows` rectangle of normal terrain
    pub fn grid(cols: u32, rows: u32) -> Self {
        let mut topology = Self::default();
        let (cols, rows) = (cols as i32, rows as i32);

        for row in 0..rows {
            for col in 0..cols {
                let label = encode(col, row);
                let neighbors = Coordinate::new(col, row)
                    .orthogonal_neighbors()
                    .iter()
                    .filter(|n| n.is_valid() && n.col < cols && n.row < rows)
                    .map(Coordinate::to_string)
                    .collect();
                topology.spaces.push(label.clone());
                topology.adjacency.insert(label, neighbors);
            }
        }

        topology
    }

    /// Remove a space along with every adjacency entry that mentions it
    pub fn remove_space(&mut self, label: &str) {
        self.spaces.retain(|s| !s.eq_ignore_ascii_case(label));
        self.adjacency.retain(|s, _| !s.eq_ignore_ascii_case(label));
        for neighbors in self.adjacency.values_mut() {
            neighbors.retain(|n| !n.eq_ignore_ascii_case(label));
        }
    }

    pub fn set_terrain(&mut self, label: &str, terrain: &str) {
        self.terrain.insert(label.to_string(), terrain.to_string());
    }

    pub fn block(&mut self, label: &str) {
        self.blocked.push(label.to_string());
    }

    /// Wall off two spaces; they stop being listed as neighbours
    pub fn add_wall(&mut self, a: &str, b: &str) {
        self.walls.push([a.to_string(), b.to_string()]);
        for (from, to) in [(a, b), (b, a)] {
            if let Some(neighbors) = self.adjacency.get_mut(from) {
                neighbors.retain(|n| !n.eq_ignore_ascii_case(to));
            }
        }
    }

    pub fn add_door(&mut self, a: &str, b: &str) {
        self.doors.push([a.to_string(), b.to_string()]);
    }
}

/// Live door state: which door edges are currently open
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorState {
    pub open: Vec<[String; 2]>,
}

impl DoorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, a: &str, b: &str) {
        self.open.push([a.to_string(), b.to_string()]);
    }
}
