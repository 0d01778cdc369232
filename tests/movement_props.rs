use proptest::prelude::*;
use skirmish_movement::board::{build_board_state, BoardState, DoorState, MapTopology, Occupancy};
use skirmish_movement::grid::{decode, edge_key, encode, footprint_cells, Coordinate, FootprintSize};
use skirmish_movement::movement::{compute_movement_cache, get_movement_target};
use skirmish_movement::units::MovementProfile;

/// 6x6 board with terrain and blocking picked from a bitmask
fn random_board(difficult: u64, blocked: u64) -> BoardState {
    let mut topology = MapTopology::grid(6, 6);
    for i in 0..36 {
        let label = encode(i % 6, i / 6);
        if difficult & (1 << i) != 0 {
            topology.set_terrain(&label, "difficult");
        }
        // Keep a1 open so the search always has a start
        if i != 0 && blocked & (1 << i) != 0 && i % 3 == 0 {
            topology.block(&label);
        }
    }
    build_board_state(&topology, &DoorState::new(), &Occupancy::default())
}

fn any_profile() -> impl Strategy<Value = MovementProfile> {
    (
        prop_oneof![
            Just(FootprintSize::new(1, 1)),
            Just(FootprintSize::new(1, 2)),
            Just(FootprintSize::new(2, 2)),
            Just(FootprintSize::new(2, 3)),
        ],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(size, massive, mobile)| MovementProfile::from_traits(size, massive, mobile))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn coordinate_round_trip(col in 0i32..1000, row in 0i32..1000) {
        prop_assert_eq!(decode(&encode(col, row)), Coordinate::new(col, row));
    }

    #[test]
    fn footprint_has_every_cell(col in 0i32..50, row in 0i32..50, w in 1u32..5, h in 1u32..5) {
        let top_left = Coordinate::new(col, row);
        let cells = footprint_cells(top_left, FootprintSize::new(w, h));

        prop_assert_eq!(cells.len() as u32, w * h);
        for cell in &cells {
            prop_assert!(cell.col >= col && cell.col < col + w as i32);
            prop_assert!(cell.row >= row && cell.row < row + h as i32);
        }
        let mut unique = cells.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn edge_key_is_symmetric(a in (0i32..100, 0i32..100), b in (0i32..100, 0i32..100)) {
        let a = Coordinate::new(a.0, a.1);
        let b = Coordinate::new(b.0, b.1);
        prop_assert_eq!(edge_key(a, b), edge_key(b, a));
        prop_assert_eq!(edge_key(a, b).label(), edge_key(b, a).label());
    }

    #[test]
    fn search_is_deterministic(
        difficult in any::<u64>(),
        blocked in any::<u64>(),
        profile in any_profile(),
        mp in 0u32..7,
    ) {
        let board = random_board(difficult, blocked);
        let first = compute_movement_cache(Coordinate::new(0, 0), mp, &board, &profile);
        let second = compute_movement_cache(Coordinate::new(0, 0), mp, &board, &profile);

        prop_assert_eq!(&first.nodes, &second.nodes);
        prop_assert_eq!(&first.cells, &second.cells);
        prop_assert_eq!(&first.parent, &second.parent);
    }

    #[test]
    fn larger_budget_never_costs_more(
        difficult in any::<u64>(),
        blocked in any::<u64>(),
        profile in any_profile(),
        mp in 0u32..6,
        extra in 1u32..4,
    ) {
        let board = random_board(difficult, blocked);
        let small = compute_movement_cache(Coordinate::new(0, 0), mp, &board, &profile);
        let large = compute_movement_cache(Coordinate::new(0, 0), mp + extra, &board, &profile);

        for (coord, record) in &small.cells {
            prop_assert!(record.cost <= mp);
            let grown = get_movement_target(&large, *coord);
            prop_assert!(grown.is_some_and(|g| g.cost <= record.cost));
        }
    }

    #[test]
    fn resting_cells_are_on_board_and_unblocked(
        difficult in any::<u64>(),
        blocked in any::<u64>(),
        mp in 0u32..8,
    ) {
        let board = random_board(difficult, blocked);
        let cache = compute_movement_cache(
            Coordinate::new(0, 0),
            mp,
            &board,
            &MovementProfile::single(),
        );

        prop_assert!(get_movement_target(&cache, Coordinate::new(0, 0)).map_or(true, |r| r.cost > 0));
        for state in cache.nodes.keys() {
            for cell in state.cells() {
                prop_assert!(board.spaces.contains(&cell));
                prop_assert!(!board.blocking.contains(&cell));
            }
        }
    }
}
