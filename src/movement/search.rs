//! Cost-limited uniform-cost search over (top-left, orientation) states
//!
//! Every state reachable within the budget is recorded with its final cost
//! and the predecessor it was first reached from at that cost. States that a
//! unit may legally end on also feed a per-coordinate table of the cheapest
//! resting placement covering each cell.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::board::state::BoardState;
use crate::grid::coord::Coordinate;
use crate::grid::footprint::{footprint_cells, FootprintSize};
use crate::movement::step::{can_rest_on, evaluate_movement_step, Step};
use crate::units::profile::MovementProfile;

/// One search node: where the footprint is anchored and how it is turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovementState {
    pub top_left: Coordinate,
    pub size: FootprintSize,
}

impl MovementState {
    pub fn new(top_left: Coordinate, size: FootprintSize) -> Self {
        Self { top_left, size }
    }

    pub fn cells(&self) -> Vec<Coordinate> {
        footprint_cells(self.top_left, self.size)
    }
}

/// Final cost of a reached state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub cost: u32,
    /// Whether the unit may end its movement here
    pub can_rest: bool,
}

/// Cheapest legal resting placement covering a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingCell {
    pub cost: u32,
    pub top_left: Coordinate,
    pub size: FootprintSize,
}

impl RestingCell {
    pub fn state(&self) -> MovementState {
        MovementState::new(self.top_left, self.size)
    }
}

/// Result of one movement search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementCache {
    pub start: Option<MovementState>,
    /// Budget the search was run with
    pub max_mp: u32,
    pub nodes: AHashMap<MovementState, NodeRecord>,
    pub cells: AHashMap<Coordinate, RestingCell>,
    pub parent: AHashMap<MovementState, MovementState>,
}

impl MovementCache {
    fn empty(start: MovementState, max_mp: u32) -> Self {
        Self {
            start: Some(start),
            max_mp,
            ..Self::default()
        }
    }

    pub fn is_reachable(&self, state: &MovementState) -> bool {
        self.nodes.contains_key(state)
    }
}

/// Frontier entry, ordered so the heap pops the cheapest state first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    cost: u32,
    state: MovementState,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find every state reachable from `start` for at most `mp_limit` points
///
/// A start whose footprint is not entirely on the board yields an empty
/// cache. The start state itself is never recorded as a resting cell.
pub fn compute_movement_cache(
    start: Coordinate,
    mp_limit: u32,
    board: &BoardState,
    profile: &MovementProfile,
) -> MovementCache {
    let start_state = MovementState::new(start, profile.size);
    let mut cache = MovementCache::empty(start_state, mp_limit);

    if start_state.cells().iter().any(|&c| !board.contains_space(c)) {
        tracing::debug!("Start {} ({}) is off the board", start, profile.size);
        return cache;
    }

    let steps = Step::available(profile);
    let mut best: AHashMap<MovementState, u32> = AHashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(start_state, 0);
    frontier.push(FrontierEntry {
        cost: 0,
        state: start_state,
    });

    while let Some(FrontierEntry { cost, state }) = frontier.pop() {
        if cache.nodes.contains_key(&state) {
            continue;
        }
        if best.get(&state).is_some_and(|&known| known < cost) {
            continue;
        }

        let can_rest = can_rest_on(board, profile, &state);
        cache.nodes.insert(state, NodeRecord { cost, can_rest });

        if can_rest && state != start_state {
            record_resting_cells(&mut cache.cells, &state, cost);
        }

        for &step in &steps {
            let outcome = match evaluate_movement_step(board, profile, &state, step) {
                Ok(outcome) => outcome,
                Err(reason) => {
                    tracing::trace!("{:?} from {}: {}", step, state.top_left, reason);
                    continue;
                }
            };

            let next_cost = cost + outcome.cost;
            if next_cost > mp_limit || cache.nodes.contains_key(&outcome.state) {
                continue;
            }
            if best
                .get(&outcome.state)
                .is_some_and(|&known| known <= next_cost)
            {
                continue;
            }

            best.insert(outcome.state, next_cost);
            cache.parent.insert(outcome.state, state);
            frontier.push(FrontierEntry {
                cost: next_cost,
                state: outcome.state,
            });
        }
    }

    tracing::debug!(
        start = %start,
        size = %profile.size,
        mp = mp_limit,
        states = cache.nodes.len(),
        cells = cache.cells.len(),
        "Computed movement cache"
    );

    cache
}

fn record_resting_cells(
    cells: &mut AHashMap<Coordinate, RestingCell>,
    state: &MovementState,
    cost: u32,
) {
    let record = RestingCell {
        cost,
        top_left: state.top_left,
        size: state.size,
    };
    for cell in state.cells() {
        cells
            .entry(cell)
            .and_modify(|existing| {
                if cost < existing.cost {
                    *existing = record;
                }
            })
            .or_insert(record);
    }
}

/// Coordinates whose cheapest resting cost is exactly `cost`, sorted
pub fn get_spaces_at_cost(cache: &MovementCache, cost: u32) -> Vec<Coordinate> {
    let mut spaces: Vec<Coordinate> = cache
        .cells
        .iter()
        .filter(|(_, record)| record.cost == cost)
        .map(|(&coord, _)| coord)
        .collect();
    spaces.sort();
    spaces
}

/// Coordinates restable for at most `budget` points, sorted
///
/// Lets a cache computed for a larger budget answer smaller ones.
pub fn get_spaces_within(cache: &MovementCache, budget: u32) -> Vec<Coordinate> {
    let mut spaces: Vec<Coordinate> = cache
        .cells
        .iter()
        .filter(|(_, record)| record.cost <= budget)
        .map(|(&coord, _)| coord)
        .collect();
    spaces.sort();
    spaces
}

/// Cheapest resting placement covering `coord`, if any
pub fn get_movement_target(cache: &MovementCache, coord: Coordinate) -> Option<&RestingCell> {
    cache.cells.get(&coord)
}

/// A requested destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDestination {
    /// Any placement covering this cell, cheapest first
    Cell(Coordinate),
    /// Exactly this anchor and orientation
    Placement(MovementState),
}

/// Resolve a destination into the resting record a move would use
pub fn resolve_destination(
    cache: &MovementCache,
    destination: &MoveDestination,
) -> Option<RestingCell> {
    match destination {
        MoveDestination::Cell(coord) => get_movement_target(cache, *coord).copied(),
        MoveDestination::Placement(state) => {
            if Some(*state) == cache.start {
                return None;
            }
            let node = cache.nodes.get(state)?;
            node.can_rest.then_some(RestingCell {
                cost: node.cost,
                top_left: state.top_left,
                size: state.size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{build_board_state, DoorState, FigurePlacement, MapTopology, Occupancy};
    use crate::grid::decode;

    fn open_board(cols: u32, rows: u32) -> BoardState {
        build_board_state(
            &MapTopology::grid(cols, rows),
            &DoorState::new(),
            &Occupancy::default(),
        )
    }

    fn labels(coords: &[Coordinate]) -> Vec<String> {
        coords.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_empty_grid_costs() {
        let board = open_board(5, 5);
        let cache = compute_movement_cache(decode("a1"), 2, &board, &MovementProfile::single());

        assert_eq!(labels(&get_spaces_at_cost(&cache, 1)), vec!["a2", "b1", "b2"]);
        assert_eq!(get_movement_target(&cache, decode("c3")).map(|r| r.cost), Some(2));
        assert!(get_movement_target(&cache, decode("d1")).is_none());
    }

    #[test]
    fn test_start_is_not_a_resting_cell_at_cost_zero() {
        let board = open_board(5, 5);
        let cache = compute_movement_cache(decode("c3"), 1, &board, &MovementProfile::single());

        assert!(get_spaces_at_cost(&cache, 0).is_empty());
        assert!(get_movement_target(&cache, decode("c3")).is_none());
        assert_eq!(cache.cells.len(), 8);
    }

    #[test]
    fn test_zero_budget_is_empty() {
        let board = open_board(5, 5);
        let cache = compute_movement_cache(decode("c3"), 0, &board, &MovementProfile::single());

        assert!(cache.cells.is_empty());
        assert_eq!(cache.nodes.len(), 1);
    }

    #[test]
    fn test_start_off_board_is_empty() {
        let board = open_board(3, 3);
        let cache = compute_movement_cache(decode("z9"), 5, &board, &MovementProfile::single());

        assert!(cache.nodes.is_empty());
        assert!(cache.cells.is_empty());
        assert!(cache.parent.is_empty());
    }

    #[test]
    fn test_occupied_cells_are_passable_but_not_restable() {
        let board = build_board_state(
            &MapTopology::grid(5, 1),
            &DoorState::new(),
            &Occupancy::Sided {
                allied: vec![FigurePlacement::from_labels("b1", "1x1")],
                hostile: vec![],
            },
        );
        let cache = compute_movement_cache(decode("a1"), 2, &board, &MovementProfile::single());

        assert!(get_movement_target(&cache, decode("b1")).is_none());
        let b1 = MovementState::new(decode("b1"), FootprintSize::SINGLE);
        assert_eq!(cache.nodes.get(&b1).map(|n| n.can_rest), Some(false));
        assert_eq!(get_movement_target(&cache, decode("c1")).map(|r| r.cost), Some(2));
    }

    #[test]
    fn test_large_unit_records_every_covered_cell() {
        let board = open_board(4, 4);
        let profile = MovementProfile::from_traits(FootprintSize::new(2, 2), false, false);
        let cache = compute_movement_cache(decode("a1"), 1, &board, &profile);

        // One step right covers b1, c1, b2, c2; one step down covers a2, b2, a3, b3
        let target = get_movement_target(&cache, decode("c1")).unwrap();
        assert_eq!(target.cost, 1);
        assert_eq!(target.top_left, decode("b1"));
        assert_eq!(get_movement_target(&cache, decode("a1")), None);
        assert_eq!(get_movement_target(&cache, decode("b2")).map(|r| r.cost), Some(1));
    }

    #[test]
    fn test_rotation_reaches_turned_state() {
        let board = open_board(3, 3);
        let profile = MovementProfile::from_traits(FootprintSize::new(1, 2), false, false);
        let cache = compute_movement_cache(decode("a1"), 1, &board, &profile);

        let turned = MovementState::new(decode("a1"), FootprintSize::new(2, 1));
        assert_eq!(cache.nodes.get(&turned).map(|n| n.cost), Some(1));
        assert_eq!(cache.parent.get(&turned), cache.start.as_ref());
    }

    #[test]
    fn test_resolve_destination() {
        let board = open_board(3, 3);
        let cache = compute_movement_cache(decode("a1"), 2, &board, &MovementProfile::single());

        let by_cell = resolve_destination(&cache, &MoveDestination::Cell(decode("c1"))).unwrap();
        assert_eq!(by_cell.cost, 2);

        let placement = MovementState::new(decode("b2"), FootprintSize::SINGLE);
        let exact = resolve_destination(&cache, &MoveDestination::Placement(placement)).unwrap();
        assert_eq!(exact.cost, 1);

        let start = MovementState::new(decode("a1"), FootprintSize::SINGLE);
        assert!(resolve_destination(&cache, &MoveDestination::Placement(start)).is_none());
    }

    #[test]
    fn test_frontier_pops_cheapest_first() {
        let a = MovementState::new(decode("a1"), FootprintSize::SINGLE);
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry { cost: 3, state: a });
        heap.push(FrontierEntry { cost: 1, state: a });
        heap.push(FrontierEntry { cost: 2, state: a });

        assert_eq!(heap.pop().map(|e| e.cost), Some(1));
        assert_eq!(heap.pop().map(|e| e.cost), Some(2));
    }
}
