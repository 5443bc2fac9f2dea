//! Route merger.
//!
//! # Algorithm
//!
//! Scans route pairs (source, target), sources taken from the fewest
//! customers upwards. A source is absorbed when every one of its
//! customers, in visit order, finds a feasible cheapest placement in a
//! working copy of the target. The first successful absorption replaces
//! the target with the copy and drops the source; the scan then restarts.
//! Absorption is all-or-nothing, so a route set at its fixed point is
//! left untouched by another run.
//!
//! # Complexity
//!
//! O(R² · n · L²) per pass where R = routes, n = customers of the source,
//! L = target length.

use log::debug;

use crate::evaluation::best_insertion;
use crate::models::{ProblemInstance, Route};

/// Merges routes until no route can be absorbed into another, or until
/// `max_passes` eliminations have been made.
///
/// Never increases the route count. Empty routes are dropped up front.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, Route};
/// use mtvrptw::constructive::merge_routes;
///
/// let depot = Customer::depot(0.0, 0.0);
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 10, 0.0),
///     Customer::new(2, 2.0, 0.0, 10, 0.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 30, Parameters::default()).unwrap();
///
/// let merged = merge_routes(&instance, vec![Route::singleton(1), Route::singleton(2)], None);
/// assert_eq!(merged.len(), 1);
/// ```
pub fn merge_routes(
    instance: &ProblemInstance,
    mut routes: Vec<Route>,
    max_passes: Option<usize>,
) -> Vec<Route> {
    routes.retain(|r| !r.is_empty());

    let mut passes = 0;
    while max_passes.is_none_or(|max| passes < max) {
        passes += 1;
        let Some((source, target, merged)) = find_absorption(instance, &routes) else {
            break;
        };
        debug!(
            "merge pass {passes}: route {source} absorbed into route {target}, {} routes left",
            routes.len() - 1
        );
        routes[target] = merged;
        routes.remove(source);
    }

    routes
}

/// First (source, target, merged target) absorption found.
fn find_absorption(instance: &ProblemInstance, routes: &[Route]) -> Option<(usize, usize, Route)> {
    let mut sources: Vec<usize> = (0..routes.len()).collect();
    sources.sort_by_key(|&i| routes[i].num_customers());

    for &source in &sources {
        for target in 0..routes.len() {
            if target == source {
                continue;
            }
            if let Some(merged) = absorb(instance, &routes[source], &routes[target]) {
                return Some((source, target, merged));
            }
        }
    }
    None
}

/// Inserts every customer of `source` into a copy of `target`, or returns
/// `None` as soon as one of them does not fit.
fn absorb(instance: &ProblemInstance, source: &Route, target: &Route) -> Option<Route> {
    let mut merged = target.clone();
    for customer in source.customers() {
        let insertion = best_insertion(instance, &merged, customer, None)?;
        insertion.apply(&mut merged, customer);
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::is_route_feasible;
    use crate::models::{Customer, Parameters, TimeWindow};

    fn tw(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    fn build(depot_due: f64, customers: Vec<Customer>, capacity: i32) -> ProblemInstance {
        let depot = Customer::depot(0.0, 0.0).with_time_window(tw(0.0, depot_due));
        ProblemInstance::new(depot, customers, capacity, Parameters::default()).expect("valid")
    }

    #[test]
    fn test_merges_compatible_routes() {
        let inst = build(
            100.0,
            vec![
                Customer::new(1, 1.0, 0.0, 5, 0.0),
                Customer::new(2, 2.0, 0.0, 5, 0.0),
                Customer::new(3, 3.0, 0.0, 5, 0.0),
            ],
            100,
        );
        let routes = vec![Route::singleton(1), Route::singleton(2), Route::singleton(3)];
        let merged = merge_routes(&inst, routes, None);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].num_customers(), 3);
        assert!(is_route_feasible(&inst, &merged[0]));
    }

    #[test]
    fn test_keeps_incompatible_routes() {
        let inst = build(
            100.0,
            vec![
                Customer::new(1, 5.0, 0.0, 10, 5.0).with_time_window(tw(0.0, 11.0)),
                Customer::new(2, -5.0, 0.0, 10, 5.0).with_time_window(tw(0.0, 11.0)),
            ],
            100,
        );
        let routes = vec![Route::singleton(1), Route::singleton(2)];
        let merged = merge_routes(&inst, routes.clone(), None);
        assert_eq!(merged, routes);
    }

    #[test]
    fn test_partial_absorption_is_not_applied() {
        // Either route has room for the first customer of the other but
        // not the second, and the depot closes before a second trip.
        let inst = build(
            6.0,
            vec![
                Customer::new(1, 1.0, 0.0, 5, 0.0),
                Customer::new(2, -1.0, 0.0, 10, 0.0),
                Customer::new(3, 1.0, 1.0, 5, 0.0),
                Customer::new(4, -1.0, 1.0, 10, 0.0),
            ],
            20,
        );
        let routes = vec![Route::from_customers(&[1, 2]), Route::from_customers(&[3, 4])];
        let merged = merge_routes(&inst, routes.clone(), None);
        assert_eq!(merged, routes);
    }

    #[test]
    fn test_pass_limit() {
        let inst = build(
            100.0,
            vec![
                Customer::new(1, 1.0, 0.0, 5, 0.0),
                Customer::new(2, 2.0, 0.0, 5, 0.0),
                Customer::new(3, 3.0, 0.0, 5, 0.0),
            ],
            100,
        );
        let routes = vec![Route::singleton(1), Route::singleton(2), Route::singleton(3)];
        assert_eq!(merge_routes(&inst, routes.clone(), Some(1)).len(), 2);
        assert_eq!(merge_routes(&inst, routes, Some(0)).len(), 3);
    }

    #[test]
    fn test_idempotent_at_fixed_point() {
        let inst = build(
            60.0,
            vec![
                Customer::new(1, 10.0, 0.0, 10, 5.0).with_time_window(tw(0.0, 20.0)),
                Customer::new(2, -10.0, 0.0, 10, 5.0).with_time_window(tw(0.0, 20.0)),
                Customer::new(3, 0.0, 10.0, 10, 5.0).with_time_window(tw(0.0, 50.0)),
                Customer::new(4, 0.0, -10.0, 10, 5.0).with_time_window(tw(30.0, 50.0)),
            ],
            20,
        );
        let routes = (1..=4).map(Route::singleton).collect();
        let once = merge_routes(&inst, routes, None);
        let twice = merge_routes(&inst, once.clone(), None);
        assert_eq!(once, twice);
        assert!(once.len() < 4);
    }

    #[test]
    fn test_drops_empty_routes() {
        let inst = build(100.0, vec![Customer::new(1, 1.0, 0.0, 5, 0.0)], 10);
        let merged = merge_routes(&inst, vec![Route::new(), Route::singleton(1)], None);
        assert_eq!(merged, vec![Route::singleton(1)]);
    }
}
