//! Inter-route relocate neighbourhood.
//!
//! # Algorithm
//!
//! One neighbour is built per route of the current solution. The chosen
//! route is taken out as the source and its customers are visited in route
//! order; each one moves to the cheapest feasible position found in any
//! other route (a new trip at the end included), or stays if there is
//! none. A source left without customers disappears from the neighbour,
//! otherwise it is put back at the end.
//!
//! Every neighbour is built on its own copy of the routes, so they can be
//! generated concurrently.
//!
//! # Complexity
//!
//! O(n · R · L²) per neighbour where n = source customers, R = routes,
//! L = target length.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::evaluation::{best_insertion, validate_route, Insertion};
use crate::models::{ProblemInstance, Solution, DEPOT};

/// Builds the neighbour of `solution` that uses route `source` as the
/// relocation source.
///
/// Fails with [`Error::InvariantViolation`] if an accepted move leaves its
/// target route infeasible.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, Route, Solution};
/// use mtvrptw::local_search::relocate_from;
///
/// let depot = Customer::depot(0.0, 0.0);
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 5, 0.0),
///     Customer::new(2, 2.0, 0.0, 5, 0.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 10, Parameters::default()).unwrap();
/// let solution = Solution::from_routes(vec![Route::singleton(1), Route::singleton(2)]);
///
/// let neighbour = relocate_from(&instance, &solution, 0).unwrap();
/// assert_eq!(neighbour.num_routes(), 1);
/// ```
pub fn relocate_from(
    instance: &ProblemInstance,
    solution: &Solution,
    source: usize,
) -> Result<Solution> {
    let mut routes = solution.routes().to_vec();
    if source >= routes.len() {
        return Ok(solution.clone());
    }
    let mut source_route = routes.remove(source);

    let mut pos = 1;
    while pos < source_route.len() {
        let customer = source_route.node_at(pos);
        if customer == DEPOT {
            pos += 1;
            continue;
        }

        let mut best: Option<(usize, Insertion)> = None;
        for (idx, target) in routes.iter().enumerate() {
            if let Some(insertion) = best_insertion(instance, target, customer, None) {
                if best.is_none_or(|(_, b)| insertion.cost < b.cost) {
                    best = Some((idx, insertion));
                }
            }
        }

        let Some((target, insertion)) = best else {
            pos += 1;
            continue;
        };

        // the next customer slides into `pos`
        let removed = source_route.remove_at(pos);
        debug_assert_eq!(removed, Some(customer));
        insertion.apply(&mut routes[target], customer);

        let violations = validate_route(instance, &routes[target]);
        if !violations.is_empty() {
            return Err(Error::invariant(
                format!("relocating customer {customer}"),
                violations.into_iter().map(|v| v.in_route(target)).collect(),
            ));
        }
    }

    if !source_route.is_empty() {
        routes.push(source_route);
    }
    Ok(Solution::from_routes(routes))
}

/// Builds one neighbour per route, in route order.
pub fn relocate_neighbours(
    instance: &ProblemInstance,
    solution: &Solution,
    parallel: bool,
) -> Result<Vec<Solution>> {
    let n = solution.num_routes();
    if parallel {
        (0..n)
            .into_par_iter()
            .map(|idx| relocate_from(instance, solution, idx))
            .collect()
    } else {
        (0..n)
            .map(|idx| relocate_from(instance, solution, idx))
            .collect()
    }
}
