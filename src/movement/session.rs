//! Memoized search results for one move in progress
//!
//! The cache only ever grows: a search run for budget B answers every query
//! up to B, and a new search happens only when a larger budget is asked for.

use crate::board::state::BoardState;
use crate::grid::coord::Coordinate;
use crate::grid::footprint::FootprintSize;
use crate::movement::path::get_movement_path;
use crate::movement::search::{compute_movement_cache, get_spaces_within, MovementCache};
use crate::units::profile::MovementProfile;

/// Owned by whoever tracks a figure's current move
#[derive(Debug, Clone)]
pub struct MoveSession {
    start: Coordinate,
    profile: MovementProfile,
    cache: Option<MovementCache>,
}

impl MoveSession {
    pub fn new(start: Coordinate, profile: MovementProfile) -> Self {
        Self {
            start,
            profile,
            cache: None,
        }
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn profile(&self) -> &MovementProfile {
        &self.profile
    }

    /// Largest budget searched so far
    pub fn max_mp(&self) -> Option<u32> {
        self.cache.as_ref().map(|cache| cache.max_mp)
    }

    /// A cache covering at least `mp` points, searching only if needed
    pub fn cache_for(&mut self, mp: u32, board: &BoardState) -> &MovementCache {
        if self.cache.as_ref().is_some_and(|cache| mp > cache.max_mp) {
            tracing::debug!(
                "Budget {} exceeds cached {:?}, recomputing",
                mp,
                self.max_mp()
            );
            self.cache = None;
        }

        let (start, profile) = (self.start, self.profile);
        self.cache
            .get_or_insert_with(|| compute_movement_cache(start, mp, board, &profile))
    }

    /// Resting coordinates affordable with `mp` points
    pub fn reachable(&mut self, mp: u32, board: &BoardState) -> Vec<Coordinate> {
        get_spaces_within(self.cache_for(mp, board), mp)
    }

    /// Route to a placement using whatever has been searched so far
    pub fn path_to(&self, dest_top_left: Coordinate, dest_size: FootprintSize) -> Vec<Coordinate> {
        match &self.cache {
            Some(cache) => {
                get_movement_path(cache, self.start, dest_top_left, dest_size, &self.profile)
            }
            None => Vec::new(),
        }
    }

    /// Drop the cache, e.g. after the board changed under the move
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{build_board_state, DoorState, MapTopology, Occupancy};
    use crate::grid::decode;

    fn board() -> BoardState {
        build_board_state(&MapTopology::grid(8, 8), &DoorState::new(), &Occupancy::default())
    }

    #[test]
    fn test_cache_grows_only_on_larger_budget() {
        let board = board();
        let mut session = MoveSession::new(decode("a1"), MovementProfile::single());
        assert_eq!(session.max_mp(), None);

        session.cache_for(3, &board);
        assert_eq!(session.max_mp(), Some(3));

        session.cache_for(2, &board);
        assert_eq!(session.max_mp(), Some(3));

        session.cache_for(5, &board);
        assert_eq!(session.max_mp(), Some(5));
    }

    #[test]
    fn test_smaller_budget_answers_from_larger_cache() {
        let board = board();
        let mut session = MoveSession::new(decode("a1"), MovementProfile::single());
        session.cache_for(4, &board);

        let reachable = session.reachable(1, &board);
        let labels: Vec<String> = reachable.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["a2", "b1", "b2"]);
        assert_eq!(session.max_mp(), Some(4));
    }

    #[test]
    fn test_path_and_invalidate() {
        let board = board();
        let mut session = MoveSession::new(decode("a1"), MovementProfile::single());
        assert!(session.path_to(decode("c3"), FootprintSize::SINGLE).is_empty());

        session.cache_for(2, &board);
        assert_eq!(
            session.path_to(decode("c3"), FootprintSize::SINGLE),
            vec![decode("a1"), decode("b2"), decode("c3")]
        );

        session.invalidate();
        assert_eq!(session.max_mp(), None);
    }
}
