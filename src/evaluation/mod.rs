//! Route feasibility checking, insertion cost, and solution validation.
//!
//! - [`can_insert_at`] / [`can_append_at_end`]: non-mutating feasibility checks
//! - [`insertion_cost`] / [`best_insertion`]: Solomon-style placement cost
//! - [`RouteEvaluator`]: schedules and violation reports
//! - [`compare_solutions`]: route count first, then a [`TieBreak`]

mod evaluator;
mod feasibility;
mod insertion;
mod objective;

pub use evaluator::{
    ensure_valid, validate_route, validate_solution, RouteEvaluator, RouteSchedule, Visit,
};
pub use feasibility::{can_append_at_end, can_insert_at, is_route_feasible};
pub use insertion::{
    best_insertion, candidate_positions, insertion_cost, is_feasible_insertion, Insertion,
};
pub use objective::{compare_solutions, is_better, TieBreak};
