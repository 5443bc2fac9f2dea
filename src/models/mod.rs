//! Domain model types for multi-trip vehicle routing with time windows.
//!
//! Provides the core abstractions: customers with demands and time windows,
//! multi-trip routes as ordered node sequences, solutions, and the problem
//! instance that ties everything together.

mod customer;
mod parameters;
mod problem;
mod route;
mod solution;

pub use customer::{Customer, TimeWindow};
pub use parameters::Parameters;
pub use problem::ProblemInstance;
pub use route::{Route, DEPOT};
pub use solution::{Solution, Violation, ViolationType};
