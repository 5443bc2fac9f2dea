//! Relocate-based improvement passes.

use log::debug;

use super::relocate_neighbours;
use crate::error::Result;
use crate::evaluation::{compare_solutions, ensure_valid, is_better};
use crate::models::{ProblemInstance, Solution};
use crate::solver::SolverConfig;

/// Runs one relocate pass with the default [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, Route, Solution};
/// use mtvrptw::local_search::improve;
///
/// let depot = Customer::depot(0.0, 0.0);
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 5, 0.0),
///     Customer::new(2, 2.0, 0.0, 5, 0.0),
///     Customer::new(3, 3.0, 0.0, 5, 0.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 10, Parameters::default()).unwrap();
/// let solution = Solution::from_routes(vec![
///     Route::from_customers(&[1, 2]),
///     Route::singleton(3),
/// ]);
///
/// let improved = improve(&solution, &instance).unwrap();
/// assert_eq!(improved.num_routes(), 1);
/// ```
pub fn improve(solution: &Solution, instance: &ProblemInstance) -> Result<Solution> {
    improve_with(solution, instance, &SolverConfig::default())
}

/// Runs one relocate pass: builds every neighbour, keeps the best one
/// under the lexicographic comparator, and returns it if it beats
/// `solution`. Otherwise `solution` comes back unchanged.
///
/// The returned solution always passes full validation; a failure there
/// is reported as [`Error::InvariantViolation`](crate::Error::InvariantViolation).
pub fn improve_with(
    solution: &Solution,
    instance: &ProblemInstance,
    config: &SolverConfig,
) -> Result<Solution> {
    let neighbours = relocate_neighbours(instance, solution, config.parallel)?;
    let best = neighbours
        .into_iter()
        .min_by(|a, b| compare_solutions(instance, a, b, config.tie_break));

    match best {
        Some(best) if is_better(instance, &best, solution, config.tie_break) => {
            ensure_valid(instance, &best, "relocate pass")?;
            Ok(best)
        }
        _ => Ok(solution.clone()),
    }
}

/// Repeats [`improve_with`] until a pass brings no improvement or
/// `config.max_improve_iterations` passes have run.
pub fn improve_until_converged(
    solution: Solution,
    instance: &ProblemInstance,
    config: &SolverConfig,
) -> Result<Solution> {
    let mut current = solution;
    for pass in 1..=config.max_improve_iterations {
        let next = improve_with(&current, instance, config)?;
        if next == current {
            debug!("relocate converged after {} passes", pass - 1);
            return Ok(current);
        }
        debug!(
            "relocate pass {pass}: {} routes, shortest {:?}",
            next.num_routes(),
            next.shortest_route_len()
        );
        current = next;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{validate_solution, TieBreak};
    use crate::models::{Customer, Parameters, Route, TimeWindow};

    fn tw(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    /// Two far-apart pairs that cannot share a vehicle, plus a zero-demand
    /// customer next to the first pair.
    fn three_route_instance() -> ProblemInstance {
        let depot = Customer::depot(0.0, 0.0).with_time_window(tw(0.0, 100.0));
        let customers = vec![
            Customer::new(1, 10.0, 0.0, 5, 0.0).with_time_window(tw(0.0, 25.0)),
            Customer::new(2, 10.0, 1.0, 5, 0.0).with_time_window(tw(0.0, 25.0)),
            Customer::new(3, -10.0, 0.0, 5, 0.0).with_time_window(tw(0.0, 25.0)),
            Customer::new(4, -10.0, 1.0, 5, 0.0).with_time_window(tw(0.0, 25.0)),
            Customer::new(5, 10.0, 2.0, 0, 0.0).with_time_window(tw(0.0, 25.0)),
        ];
        ProblemInstance::new(depot, customers, 10, Parameters::default()).expect("valid")
    }

    fn three_routes() -> Solution {
        Solution::from_routes(vec![
            Route::from_customers(&[1, 2]),
            Route::from_customers(&[3, 4]),
            Route::singleton(5),
        ])
    }

    #[test]
    fn test_pass_removes_relocatable_route() {
        let inst = three_route_instance();
        let improved = improve_with(&three_routes(), &inst, &SolverConfig::sequential())
            .expect("valid");
        assert_eq!(improved.num_routes(), 2);
        assert!(validate_solution(&inst, &improved).is_empty());
    }

    #[test]
    fn test_no_improvement_returns_input() {
        let inst = three_route_instance();
        let sol = Solution::from_routes(vec![
            Route::from_customers(&[1, 2, 5]),
            Route::from_customers(&[3, 4]),
        ]);
        let improved = improve(&sol, &inst).expect("valid");
        assert_eq!(improved, sol);
    }

    #[test]
    fn test_empty_solution() {
        let depot = Customer::depot(0.0, 0.0);
        let inst = ProblemInstance::new(depot, vec![], 10, Parameters::default()).expect("valid");
        let improved = improve(&Solution::new(), &inst).expect("valid");
        assert!(improved.is_empty());
    }

    #[test]
    fn test_never_worse_under_either_tie_break() {
        let inst = three_route_instance();
        for tie_break in [TieBreak::ShortestRoute, TieBreak::TotalDistance] {
            let config = SolverConfig::sequential().with_tie_break(tie_break);
            let start = three_routes();
            let improved = improve_with(&start, &inst, &config).expect("valid");
            assert_ne!(
                compare_solutions(&inst, &improved, &start, tie_break),
                std::cmp::Ordering::Greater
            );
        }
    }

    #[test]
    fn test_until_converged_reaches_fixed_point() {
        let inst = three_route_instance();
        let config = SolverConfig::sequential();
        let converged = improve_until_converged(three_routes(), &inst, &config).expect("valid");
        let again = improve_with(&converged, &inst, &config).expect("valid");
        assert_eq!(converged, again);
        assert_eq!(converged.num_routes(), 2);
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let inst = three_route_instance();
        let config = SolverConfig::sequential().with_max_improve_iterations(0);
        let out = improve_until_converged(three_routes(), &inst, &config).expect("valid");
        assert_eq!(out, three_routes());
    }
}
