//! # mtvrptw
//!
//! Cluster-route-merge heuristic for the Multi-Trip Vehicle Routing Problem
//! with Time Windows: customers are clustered by time window, each cluster
//! is routed by sequential insertion, the route sets are merged, and a
//! relocate local search squeezes out further routes. The whole pipeline
//! runs once per cluster count and the best result is kept.
//!
//! ## Modules
//!
//! - [`models`]: domain types (Customer, TimeWindow, Route, Solution, ProblemInstance)
//! - [`distance`]: symmetric distance and travel-time table
//! - [`evaluation`]: schedules, feasibility checks, insertion cost, solution ordering
//! - [`constructive`]: time-window clustering, sequential insertion, route merging
//! - [`local_search`]: relocate neighbourhood and improvement passes
//! - [`solver`]: configuration and the multi-start driver
//! - [`io`]: `parameters.txt` and Solomon-format files
//! - [`generator`]: seeded random instances
//!
//! ## Example
//!
//! ```
//! use mtvrptw::models::{Customer, Parameters, ProblemInstance, TimeWindow};
//! use mtvrptw::solver::{solve, SolverConfig};
//!
//! let depot = Customer::depot(0.0, 0.0)
//!     .with_time_window(TimeWindow::new(0.0, 100.0).unwrap());
//! let customers = vec![
//!     Customer::new(1, 2.0, 0.0, 10, 1.0).with_time_window(TimeWindow::new(0.0, 20.0).unwrap()),
//!     Customer::new(2, 3.0, 1.0, 10, 1.0).with_time_window(TimeWindow::new(0.0, 20.0).unwrap()),
//!     Customer::new(3, 1.0, 2.0, 10, 1.0).with_time_window(TimeWindow::new(0.0, 20.0).unwrap()),
//! ];
//! let instance = ProblemInstance::new(depot, customers, 50, Parameters::default()).unwrap();
//!
//! let best = solve(&instance, &SolverConfig::default()).unwrap();
//! assert_eq!(best.solution.num_routes(), 1);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod io;
pub mod local_search;
pub mod models;
pub mod solver;

pub use constructive::{construct, Candidate};
pub use error::{Error, Result};
pub use local_search::improve;
pub use solver::{best_of, solve, SolverConfig};
