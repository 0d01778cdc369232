//! Ad hoc range queries ("spaces within N of this figure")

use std::borrow::Cow;

use crate::board::state::{BoardState, Occupancy};
use crate::grid::coord::Coordinate;
use crate::movement::search::{compute_movement_cache, get_spaces_within};
use crate::units::profile::MovementProfile;

/// Coordinates a plain 1x1 figure could move to from `start` for `mp` points
///
/// `occupancy`, when given, replaces the board's live figure positions.
pub fn get_reachable_spaces(
    start: Coordinate,
    mp: u32,
    board: &BoardState,
    occupancy: Option<&Occupancy>,
) -> Vec<Coordinate> {
    let board = match occupancy {
        Some(occupancy) => Cow::Owned(board.with_occupancy(occupancy)),
        None => Cow::Borrowed(board),
    };

    let cache = compute_movement_cache(start, mp, &board, &MovementProfile::single());
    get_spaces_within(&cache, mp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{build_board_state, DoorState, FigurePlacement, MapTopology};
    use crate::grid::decode;

    #[test]
    fn test_range_counts_on_open_grid() {
        let board = build_board_state(
            &MapTopology::grid(7, 7),
            &DoorState::new(),
            &Occupancy::default(),
        );

        // King moves: a 5x5 square minus the start, which is only ever reached at cost 0
        let reachable = get_reachable_spaces(decode("d4"), 2, &board, None);
        assert_eq!(reachable.len(), 24);
        assert!(!reachable.contains(&decode("d4")));
        assert_eq!(get_reachable_spaces(decode("d4"), 1, &board, None).len(), 8);
        assert!(get_reachable_spaces(decode("d4"), 0, &board, None).is_empty());
    }

    #[test]
    fn test_occupancy_override() {
        let board = build_board_state(
            &MapTopology::grid(3, 1),
            &DoorState::new(),
            &Occupancy::default(),
        );
        let occupancy = Occupancy::Unsided(vec![FigurePlacement::from_labels("b1", "1x1")]);

        let open = get_reachable_spaces(decode("a1"), 2, &board, None);
        assert!(open.contains(&decode("b1")));
        assert!(open.contains(&decode("c1")));

        // b1 costs 2 to enter and cannot be ended on, so c1 is out of reach
        let crowded = get_reachable_spaces(decode("a1"), 2, &board, Some(&occupancy));
        assert!(crowded.is_empty());
    }
}
