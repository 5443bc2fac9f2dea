//! Sequential insertion heuristic for one time-window cluster.
//!
//! # Algorithm
//!
//! 1. Seed a route with the unrouted customer whose window opens first.
//! 2. Repeatedly insert, among all unrouted customers, the one with the
//!    cheapest feasible placement in any route opened so far. Only the
//!    `p` positions nearest to the customer are examined per route.
//! 3. When nothing fits, open a new route with the next earliest customer.
//!
//! Placements include new trips appended after a route's closing depot,
//! so a vehicle keeps working after reloading.
//!
//! # Complexity
//!
//! O(n² · m · p · L) where n = customers, m = routes, L = route length
//! (each feasibility check walks the route).
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use log::warn;

use crate::evaluation::{best_insertion, can_insert_at, Insertion};
use crate::models::{ProblemInstance, Route};

/// Builds a route set serving exactly the customers in `cluster`.
///
/// Routes built for different clusters never interact, so clusters may be
/// processed on separate threads.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, TimeWindow};
/// use mtvrptw::constructive::sequential_insertion;
///
/// let depot = Customer::depot(0.0, 0.0)
///     .with_time_window(TimeWindow::new(0.0, 100.0).unwrap());
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 10, 2.0),
///     Customer::new(2, 2.0, 0.0, 10, 2.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 30, Parameters::default()).unwrap();
///
/// let routes = sequential_insertion(&instance, &[1, 2]);
/// assert_eq!(routes.len(), 1);
/// assert_eq!(routes[0].num_customers(), 2);
/// ```
pub fn sequential_insertion(instance: &ProblemInstance, cluster: &[usize]) -> Vec<Route> {
    let limit = Some(instance.parameters().neighbourhood_size);
    let mut unrouted = cluster.to_vec();
    let mut routes: Vec<Route> = Vec::new();

    while let Some(seed_idx) = earliest_ready(instance, &unrouted) {
        let seed = unrouted.remove(seed_idx);
        routes.push(open_route(instance, seed));

        while let Some((ui, ri, insertion)) =
            cheapest_insertion(instance, &routes, &unrouted, limit)
        {
            let customer = unrouted.remove(ui);
            insertion.apply(&mut routes[ri], customer);
        }
    }

    routes
}

/// Starts a route serving only `seed`.
///
/// Validated instances guarantee the singleton is feasible; if it is not,
/// the customer still gets its own route so that nobody is dropped.
fn open_route(instance: &ProblemInstance, seed: usize) -> Route {
    if !can_insert_at(instance, &Route::new(), 1, seed) {
        warn!("customer {seed} is not feasible on its own; giving it a singleton route");
    }
    Route::singleton(seed)
}

/// Index in `unrouted` of the customer with the earliest ready time
/// (lowest id on ties).
fn earliest_ready(instance: &ProblemInstance, unrouted: &[usize]) -> Option<usize> {
    unrouted
        .iter()
        .enumerate()
        .min_by(|&(_, &a), &(_, &b)| {
            instance
                .node(a)
                .ready()
                .total_cmp(&instance.node(b).ready())
                .then(a.cmp(&b))
        })
        .map(|(i, _)| i)
}

/// Cheapest feasible (unrouted index, route index, placement) over all
/// unrouted customers and all routes.
fn cheapest_insertion(
    instance: &ProblemInstance,
    routes: &[Route],
    unrouted: &[usize],
    limit: Option<usize>,
) -> Option<(usize, usize, Insertion)> {
    let mut best: Option<(usize, usize, Insertion)> = None;
    for (ui, &customer) in unrouted.iter().enumerate() {
        for (ri, route) in routes.iter().enumerate() {
            if let Some(insertion) = best_insertion(instance, route, customer, limit) {
                if best.is_none_or(|(_, _, b)| insertion.cost < b.cost) {
                    best = Some((ui, ri, insertion));
                }
            }
        }
    }
    best
}
