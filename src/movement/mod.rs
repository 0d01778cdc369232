//! Movement engine - reachability, costs, and routes for one figure
//!
//! A search runs over (top-left, orientation) states, pricing each step
//! against a single immutable board snapshot:
//! - footprints must stay on the board and off blocking spaces
//! - walls and closed doors cut individual edges
//! - difficult terrain and enemy figures each add one point
//! - diagonals are only for 1x1 figures and never cut a corner

pub mod batch;
pub mod path;
pub mod range;
pub mod search;
pub mod session;
pub mod step;

pub use batch::{compute_movement_caches, MovementRequest};
pub use path::{get_movement_path, get_movement_states};
pub use range::get_reachable_spaces;
pub use search::{
    compute_movement_cache, get_movement_target, get_spaces_at_cost, get_spaces_within,
    resolve_destination, MoveDestination, MovementCache, MovementState, NodeRecord, RestingCell,
};
pub use session::MoveSession;
pub use step::{can_rest_on, evaluate_movement_step, Step, StepOutcome, StepRejection};
