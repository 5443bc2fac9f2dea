//! Top-level solver: configuration and the multi-start driver.

mod config;
mod multi_start;

pub use config::SolverConfig;
pub use multi_start::{best_of, solve, solve_all, solve_for};
