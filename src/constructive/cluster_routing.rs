//! Cluster-first construction: cluster, build per cluster, merge.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{cluster_by_time_window, merge_routes, sequential_insertion};
use crate::error::{Error, Result};
use crate::evaluation::ensure_valid;
use crate::models::{ProblemInstance, Route, Solution};
use crate::solver::SolverConfig;

/// The solution produced for one cluster count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Number of time-window clusters used to build it.
    pub num_clusters: usize,
    /// The routes.
    pub solution: Solution,
}

/// Builds the merged initial solution for `num_clusters` clusters with
/// the default [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, TimeWindow};
/// use mtvrptw::constructive::construct;
///
/// let depot = Customer::depot(0.0, 0.0)
///     .with_time_window(TimeWindow::new(0.0, 100.0).unwrap());
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 10, 1.0),
///     Customer::new(2, 2.0, 0.0, 10, 1.0),
///     Customer::new(3, 3.0, 0.0, 10, 1.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 30, Parameters::default()).unwrap();
///
/// let candidate = construct(&instance, 2).unwrap();
/// assert_eq!(candidate.num_clusters, 2);
/// assert_eq!(candidate.solution.num_served(), 3);
/// ```
pub fn construct(instance: &ProblemInstance, num_clusters: usize) -> Result<Candidate> {
    construct_with(instance, num_clusters, &SolverConfig::default())
}

/// Clusters the customers by time window, builds one route set per
/// cluster (concurrently when `config.parallel`), concatenates them, and
/// merges the result.
///
/// Cluster results are concatenated in cluster order, so the outcome does
/// not depend on scheduling.
pub fn construct_with(
    instance: &ProblemInstance,
    num_clusters: usize,
    config: &SolverConfig,
) -> Result<Candidate> {
    if num_clusters == 0 {
        return Err(Error::invalid_instance("cluster count must be at least 1"));
    }

    let clusters = cluster_by_time_window(instance, num_clusters);
    let per_cluster: Vec<Vec<Route>> = if config.parallel {
        clusters
            .par_iter()
            .map(|cluster| sequential_insertion(instance, cluster))
            .collect()
    } else {
        clusters
            .iter()
            .map(|cluster| sequential_insertion(instance, cluster))
            .collect()
    };

    let routes: Vec<Route> = per_cluster.into_iter().flatten().collect();
    let initial = routes.len();
    let merged = merge_routes(instance, routes, config.max_merge_passes);
    debug!(
        "{num_clusters} clusters: {initial} routes built, {} after merging",
        merged.len()
    );

    let solution = Solution::from_routes(merged);
    ensure_valid(instance, &solution, "cluster construction and merging")?;
    Ok(Candidate {
        num_clusters,
        solution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Parameters, TimeWindow};

    fn tw(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    fn mixed_instance() -> ProblemInstance {
        let depot = Customer::depot(40.0, 50.0).with_time_window(tw(0.0, 240.0));
        let customers = vec![
            Customer::new(1, 45.0, 68.0, 10, 10.0).with_time_window(tw(0.0, 60.0)),
            Customer::new(2, 45.0, 70.0, 30, 10.0).with_time_window(tw(10.0, 80.0)),
            Customer::new(3, 42.0, 66.0, 10, 10.0).with_time_window(tw(60.0, 120.0)),
            Customer::new(4, 42.0, 68.0, 10, 10.0).with_time_window(tw(70.0, 150.0)),
            Customer::new(5, 38.0, 68.0, 20, 10.0).with_time_window(tw(120.0, 200.0)),
            Customer::new(6, 25.0, 85.0, 20, 10.0).with_time_window(tw(100.0, 180.0)),
        ];
        ProblemInstance::new(depot, customers, 50, Parameters::default()).expect("valid")
    }

    #[test]
    fn test_construct_serves_everyone() {
        let inst = mixed_instance();
        for k in 1..=4 {
            let candidate = construct_with(&inst, k, &SolverConfig::sequential()).expect("valid");
            let mut served: Vec<usize> = candidate
                .solution
                .routes()
                .iter()
                .flat_map(|r| r.customer_ids())
                .collect();
            served.sort_unstable();
            assert_eq!(served, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inst = mixed_instance();
        for k in 1..=3 {
            let seq = construct_with(&inst, k, &SolverConfig::sequential()).expect("valid");
            let par = construct_with(&inst, k, &SolverConfig::default()).expect("valid");
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_zero_clusters_rejected() {
        let inst = mixed_instance();
        assert!(matches!(
            construct(&inst, 0),
            Err(Error::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_empty_instance_gives_empty_solution() {
        let depot = Customer::depot(0.0, 0.0);
        let inst = ProblemInstance::new(depot, vec![], 10, Parameters::default()).expect("valid");
        let candidate = construct(&inst, 3).expect("valid");
        assert_eq!(candidate.solution.num_routes(), 0);
    }
}
