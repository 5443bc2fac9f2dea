//! Cluster-first construction of initial MTVRPTW solutions.
//!
//! - [`cluster_by_time_window`]: contiguous time-window bands, O(n log n)
//! - [`sequential_insertion`]: Solomon-style insertion within one cluster, O(n²·p)
//! - [`merge_routes`]: all-or-nothing route absorption until a fixed point
//! - [`construct`]: the three above chained, clusters built in parallel

mod cluster_routing;
mod clustering;
mod merge;
mod sequential_insertion;

pub use cluster_routing::{construct, construct_with, Candidate};
pub use clustering::cluster_by_time_window;
pub use merge::merge_routes;
pub use sequential_insertion::sequential_insertion;
