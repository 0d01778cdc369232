//! Replaying recorded predecessors into a concrete route

use crate::grid::coord::Coordinate;
use crate::grid::footprint::FootprintSize;
use crate::movement::search::{MovementCache, MovementState};
use crate::units::profile::MovementProfile;

/// Every state from the start to the destination, inclusive
///
/// Empty if the destination was never reached or the chain does not lead
/// back to `start`.
pub fn get_movement_states(
    cache: &MovementCache,
    start: Coordinate,
    dest_top_left: Coordinate,
    dest_size: FootprintSize,
    profile: &MovementProfile,
) -> Vec<MovementState> {
    let start_state = MovementState::new(start, profile.size);
    let destination = MovementState::new(dest_top_left, dest_size);

    if !cache.is_reachable(&destination) {
        return Vec::new();
    }

    let mut path = vec![destination];
    let mut current = destination;
    while current != start_state {
        let Some(&previous) = cache.parent.get(&current) else {
            return Vec::new();
        };
        path.push(previous);
        current = previous;

        if path.len() > cache.nodes.len() {
            tracing::warn!("Predecessor chain from {} does not terminate", dest_top_left);
            return Vec::new();
        }
    }

    path.reverse();
    path
}

/// Top-left placements from the start to the destination, inclusive
///
/// A rotation keeps the anchor, so it shows up as a repeated placement.
pub fn get_movement_path(
    cache: &MovementCache,
    start: Coordinate,
    dest_top_left: Coordinate,
    dest_size: FootprintSize,
    profile: &MovementProfile,
) -> Vec<Coordinate> {
    get_movement_states(cache, start, dest_top_left, dest_size, profile)
        .into_iter()
        .map(|state| state.top_left)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{build_board_state, DoorState, MapTopology, Occupancy};
    use crate::grid::decode;
    use crate::movement::search::compute_movement_cache;

    fn labels(coords: &[Coordinate]) -> Vec<String> {
        coords.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_path_around_wall() {
        let mut topology = MapTopology::grid(3, 3);
        topology.add_wall("a1", "b1");
        topology.add_wall("a2", "b2");
        let board = build_board_state(&topology, &DoorState::new(), &Occupancy::default());
        let profile = MovementProfile::single();
        let cache = compute_movement_cache(decode("a1"), 4, &board, &profile);

        let path = get_movement_path(&cache, decode("a1"), decode("b1"), FootprintSize::SINGLE, &profile);

        assert_eq!(path.first(), Some(&decode("a1")));
        assert_eq!(path.last(), Some(&decode("b1")));
        assert_eq!(labels(&path), vec!["a1", "a2", "a3", "b2", "b1"]);
    }

    #[test]
    fn test_path_to_start_is_just_start() {
        let board = build_board_state(&MapTopology::grid(3, 3), &DoorState::new(), &Occupancy::default());
        let profile = MovementProfile::single();
        let cache = compute_movement_cache(decode("b2"), 2, &board, &profile);

        let path = get_movement_path(&cache, decode("b2"), decode("b2"), FootprintSize::SINGLE, &profile);
        assert_eq!(path, vec![decode("b2")]);
    }

    #[test]
    fn test_unreached_destination_is_empty() {
        let board = build_board_state(&MapTopology::grid(5, 5), &DoorState::new(), &Occupancy::default());
        let profile = MovementProfile::single();
        let cache = compute_movement_cache(decode("a1"), 1, &board, &profile);

        assert!(get_movement_path(&cache, decode("a1"), decode("e5"), FootprintSize::SINGLE, &profile)
            .is_empty());
    }

    #[test]
    fn test_states_show_rotation() {
        let board = build_board_state(&MapTopology::grid(3, 3), &DoorState::new(), &Occupancy::default());
        let profile = MovementProfile::from_traits(FootprintSize::new(1, 2), false, false);
        let cache = compute_movement_cache(decode("a1"), 2, &board, &profile);

        let states = get_movement_states(&cache, decode("a1"), decode("a1"), FootprintSize::new(2, 1), &profile);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].size, FootprintSize::new(1, 2));
        assert_eq!(states[1].size, FootprintSize::new(2, 1));
        assert_eq!(
            get_movement_path(&cache, decode("a1"), decode("a1"), FootprintSize::new(2, 1), &profile),
            vec![decode("a1"), decode("a1")]
        );
    }
}
