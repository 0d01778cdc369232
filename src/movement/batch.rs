//! Independent movement searches evaluated in parallel

use rayon::prelude::*;

use crate::board::state::BoardState;
use crate::grid::coord::Coordinate;
use crate::movement::search::{compute_movement_cache, MovementCache};
use crate::units::profile::MovementProfile;

/// One figure's search inputs; each request brings its own board snapshot
#[derive(Debug, Clone, Copy)]
pub struct MovementRequest<'a> {
    pub start: Coordinate,
    pub mp_limit: u32,
    pub board: &'a BoardState,
    pub profile: MovementProfile,
}

/// Run every request, results in request order
pub fn compute_movement_caches(requests: &[MovementRequest<'_>]) -> Vec<MovementCache> {
    // PARALLEL: searches share only immutable inputs
    requests
        .par_iter()
        .map(|request| {
            compute_movement_cache(
                request.start,
                request.mp_limit,
                request.board,
                &request.profile,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{build_board_state, DoorState, MapTopology, Occupancy};
    use crate::grid::{decode, FootprintSize};

    #[test]
    fn test_batch_matches_sequential() {
        let mut topology = MapTopology::grid(6, 6);
        topology.set_terrain("c3", "difficult");
        topology.block("d4");
        let board = build_board_state(&topology, &DoorState::new(), &Occupancy::default());

        let requests = vec![
            MovementRequest {
                start: decode("a1"),
                mp_limit: 4,
                board: &board,
                profile: MovementProfile::single(),
            },
            MovementRequest {
                start: decode("e5"),
                mp_limit: 3,
                board: &board,
                profile: MovementProfile::from_traits(FootprintSize::new(1, 2), false, false),
            },
            MovementRequest {
                start: decode("z26"),
                mp_limit: 3,
                board: &board,
                profile: MovementProfile::single(),
            },
        ];

        let caches = compute_movement_caches(&requests);

        assert_eq!(caches.len(), requests.len());
        for (request, cache) in requests.iter().zip(&caches) {
            let sequential = compute_movement_cache(
                request.start,
                request.mp_limit,
                request.board,
                &request.profile,
            );
            assert_eq!(cache, &sequential);
        }
        assert!(caches[2].nodes.is_empty());
    }
}
