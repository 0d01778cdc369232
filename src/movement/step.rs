//! Edge legality and cost for a single movement step

use ahash::AHashSet;
use thiserror::Error;

use crate::board::state::BoardState;
use crate::core::constants::{
    DIFFICULT_TERRAIN_SURCHARGE, FIGURE_SURCHARGE, ROTATION_COST, STEP_COST,
};
use crate::grid::coord::Coordinate;
use crate::movement::search::MovementState;
use crate::units::profile::MovementProfile;

/// N, E, S, W
pub const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// NE, SE, SW, NW
pub const DIAGONAL_STEPS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// One outgoing edge of a movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Translate { dx: i32, dy: i32 },
    /// Swap the footprint's cols and rows around the same top-left
    Rotate,
}

impl Step {
    /// Every step kind a unit with this profile may attempt
    pub fn available(profile: &MovementProfile) -> Vec<Step> {
        let mut steps: Vec<Step> = ORTHOGONAL_STEPS
            .iter()
            .map(|&(dx, dy)| Step::Translate { dx, dy })
            .collect();

        if profile.allow_diagonal {
            steps.extend(DIAGONAL_STEPS.iter().map(|&(dx, dy)| Step::Translate { dx, dy }));
        }
        if profile.can_rotate {
            steps.push(Step::Rotate);
        }

        steps
    }
}

/// Why a step was not taken
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRejection {
    #[error("footprint leaves the board")]
    OffBoard,

    #[error("footprint covers a blocking space")]
    Blocked,

    #[error("step does not enter any new space")]
    NullMove,

    #[error("a wall or closed door is in the way")]
    EdgeBlocked,

    #[error("diagonal movement is not allowed for this footprint")]
    DiagonalNotAllowed,

    #[error("diagonal step would cut a corner")]
    CornerCut,

    #[error("rotation is not allowed for this footprint")]
    RotationNotAllowed,

    #[error("rotated footprint overlaps another figure")]
    RotationOccupied,
}

/// A legal step: where it lands and what it costs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub state: MovementState,
    pub cost: u32,
}

/// Check one step from `from` and price it
pub fn evaluate_movement_step(
    board: &BoardState,
    profile: &MovementProfile,
    from: &MovementState,
    step: Step,
) -> Result<StepOutcome, StepRejection> {
    match step {
        Step::Translate { dx, dy } => evaluate_translation(board, profile, from, dx, dy),
        Step::Rotate => evaluate_rotation(board, profile, from),
    }
}

fn evaluate_translation(
    board: &BoardState,
    profile: &MovementProfile,
    from: &MovementState,
    dx: i32,
    dy: i32,
) -> Result<StepOutcome, StepRejection> {
    if dx != 0 && dy != 0 {
        if !profile.allow_diagonal {
            return Err(StepRejection::DiagonalNotAllowed);
        }
        check_corner(board, profile, from.top_left, dx, dy)?;
    }

    let next = MovementState::new(from.top_left.offset(dx, dy), from.size);
    let cells = next.cells();
    check_footprint(board, profile, &cells)?;

    let previous: AHashSet<Coordinate> = from.cells().into_iter().collect();
    let entering: Vec<Coordinate> = cells.into_iter().filter(|c| !previous.contains(c)).collect();
    if entering.is_empty() {
        return Err(StepRejection::NullMove);
    }

    // The traversed edge runs from each entering cell back to the cell it left
    if entering
        .iter()
        .any(|&cell| board.is_edge_blocked(cell, cell.offset(-dx, -dy)))
    {
        return Err(StepRejection::EdgeBlocked);
    }

    let mut cost = STEP_COST;
    if !profile.ignore_difficult && entering.iter().any(|&c| board.is_difficult(c)) {
        cost += DIFFICULT_TERRAIN_SURCHARGE;
    }
    if !profile.ignore_figure_cost {
        let figures = board.figure_cost_cells();
        if entering.iter().any(|c| figures.contains(c)) {
            cost += FIGURE_SURCHARGE;
        }
    }

    Ok(StepOutcome { state: next, cost })
}

/// Both orthogonal cells beside a diagonal must be open spaces adjacent to
/// the current top-left
fn check_corner(
    board: &BoardState,
    profile: &MovementProfile,
    top_left: Coordinate,
    dx: i32,
    dy: i32,
) -> Result<(), StepRejection> {
    for side in [top_left.offset(dx, 0), top_left.offset(0, dy)] {
        if !board.contains_space(side) || !board.is_adjacent(top_left, side) {
            return Err(StepRejection::CornerCut);
        }
        if !profile.ignore_blocking && board.is_blocking(side) {
            return Err(StepRejection::CornerCut);
        }
    }
    Ok(())
}

fn evaluate_rotation(
    board: &BoardState,
    profile: &MovementProfile,
    from: &MovementState,
) -> Result<StepOutcome, StepRejection> {
    if !profile.can_rotate || from.size.is_square() {
        return Err(StepRejection::RotationNotAllowed);
    }

    let next = MovementState::new(from.top_left, from.size.rotated());
    let cells = next.cells();
    check_footprint(board, profile, &cells)?;

    if !profile.can_end_on_occupied && cells.iter().any(|&c| board.is_occupied(c)) {
        return Err(StepRejection::RotationOccupied);
    }

    Ok(StepOutcome {
        state: next,
        cost: ROTATION_COST,
    })
}

fn check_footprint(
    board: &BoardState,
    profile: &MovementProfile,
    cells: &[Coordinate],
) -> Result<(), StepRejection> {
    if cells.iter().any(|&c| !board.contains_space(c)) {
        return Err(StepRejection::OffBoard);
    }
    if !profile.ignore_blocking && cells.iter().any(|&c| board.is_blocking(c)) {
        return Err(StepRejection::Blocked);
    }
    Ok(())
}

/// May a unit end its movement in this state?
pub fn can_rest_on(board: &BoardState, profile: &MovementProfile, state: &MovementState) -> bool {
    profile.can_end_on_occupied || state.cells().iter().all(|&c| !board.is_occupied(c))
}
