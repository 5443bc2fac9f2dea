//! Multi-start driver over cluster counts.
//!
//! Every cluster count K in `1..=threshold` yields one candidate:
//! construction, merging, then relocate passes. The candidates are
//! independent and run concurrently when the configuration allows it; the
//! final pick uses the same ordering as the local search.

use log::info;
use rayon::prelude::*;

use super::SolverConfig;
use crate::constructive::{construct_with, Candidate};
use crate::error::Result;
use crate::evaluation::{compare_solutions, TieBreak};
use crate::local_search::improve_until_converged;
use crate::models::{ProblemInstance, Solution};

/// Builds and improves the candidate for one cluster count.
pub fn solve_for(
    instance: &ProblemInstance,
    num_clusters: usize,
    config: &SolverConfig,
) -> Result<Candidate> {
    let constructed = construct_with(instance, num_clusters, config)?;
    let built_routes = constructed.solution.num_routes();
    let solution = if config.improve {
        improve_until_converged(constructed.solution, instance, config)?
    } else {
        constructed.solution
    };
    info!(
        "K={num_clusters}: {built_routes} routes after merging, {} after local search",
        solution.num_routes()
    );
    Ok(Candidate {
        num_clusters,
        solution,
    })
}

/// Produces one candidate per cluster count, ordered by K.
///
/// With `config.num_threads` set, the work runs on a dedicated pool of
/// that size instead of rayon's global pool.
pub fn solve_all(instance: &ProblemInstance, config: &SolverConfig) -> Result<Vec<Candidate>> {
    match config.num_threads {
        Some(n) if config.parallel => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            pool.install(|| run_all(instance, config))
        }
        _ => run_all(instance, config),
    }
}

fn run_all(instance: &ProblemInstance, config: &SolverConfig) -> Result<Vec<Candidate>> {
    let threshold = instance.parameters().num_clusters_threshold;
    if config.parallel {
        (1..=threshold)
            .into_par_iter()
            .map(|k| solve_for(instance, k, config))
            .collect()
    } else {
        (1..=threshold)
            .map(|k| solve_for(instance, k, config))
            .collect()
    }
}

/// Picks the best candidate: fewest routes, then `tie_break`. The lowest
/// cluster count wins a full tie.
pub fn best_of(
    instance: &ProblemInstance,
    candidates: Vec<Candidate>,
    tie_break: TieBreak,
) -> Option<Candidate> {
    candidates
        .into_iter()
        .min_by(|a, b| compare_solutions(instance, &a.solution, &b.solution, tie_break))
}

/// Runs every cluster count and returns the best candidate.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, TimeWindow};
/// use mtvrptw::solver::{solve, SolverConfig};
///
/// let depot = Customer::depot(0.0, 0.0)
///     .with_time_window(TimeWindow::new(0.0, 200.0).unwrap());
/// let customers = (1..=6)
///     .map(|i| Customer::new(i, i as f64, (i % 3) as f64, 10, 2.0))
///     .collect();
/// let params = Parameters::default().with_num_clusters_threshold(3);
/// let instance = ProblemInstance::new(depot, customers, 40, params).unwrap();
///
/// let best = solve(&instance, &SolverConfig::sequential()).unwrap();
/// assert_eq!(best.solution.num_served(), 6);
/// ```
pub fn solve(instance: &ProblemInstance, config: &SolverConfig) -> Result<Candidate> {
    let candidates = solve_all(instance, config)?;
    let best = best_of(instance, candidates, config.tie_break).unwrap_or(Candidate {
        num_clusters: 1,
        solution: Solution::new(),
    });
    info!(
        "best: K={} with {} routes, distance {:.2}",
        best.num_clusters,
        best.solution.num_routes(),
        best.solution.total_distance(instance.distances())
    );
    Ok(best)
}
