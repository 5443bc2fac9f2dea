//! Insertion cost and best-insertion search.
//!
//! The cost of placing customer `u` between `i` and `j` follows Solomon's
//! I1 criterion with μ = 1:
//!
//! c(i,u,j) = α₁·(d(i,u) + d(u,j) − d(i,j)) + α₂·(b'ⱼ − bⱼ)
//!
//! where bⱼ and b'ⱼ are the service starts at `j` without and with `u`.
//! Appending a new trip is priced the same way with `i` the closing depot
//! and `j` the fresh one.
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use std::cmp::Ordering;

use super::feasibility::{can_append_at_end, can_insert_at, Cursor};
use crate::models::{ProblemInstance, Route, DEPOT};

/// A feasible placement of a customer in a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insertion {
    /// Index the customer will occupy. Equal to the route length when the
    /// customer opens a new trip after the closing depot.
    pub position: usize,
    /// Insertion cost (lower is better).
    pub cost: f64,
}

impl Insertion {
    /// Returns `true` if this placement appends a new trip.
    pub fn is_append(&self, route: &Route) -> bool {
        self.position >= route.len()
    }

    /// Applies the placement to `route`.
    pub fn apply(&self, route: &mut Route, node: usize) {
        if self.is_append(route) {
            route.append_trip(node);
        } else {
            route.insert_at(self.position, node);
        }
    }
}

/// Cost of inserting `node` at `pos` in `route` (see the module docs).
///
/// `pos` ranges over `1..=route.len()`, the last value standing for a new
/// trip. Feasibility is not checked here.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, Route};
/// use mtvrptw::evaluation::insertion_cost;
///
/// let depot = Customer::depot(0.0, 0.0);
/// let customers = vec![
///     Customer::new(1, 2.0, 0.0, 1, 0.0),
///     Customer::new(2, 1.0, 0.0, 1, 0.0),
/// ];
/// let params = Parameters::default().with_alphas(1.0, 0.0);
/// let instance = ProblemInstance::new(depot, customers, 10, params).unwrap();
///
/// // 2 lies on the way to 1: no detour at all.
/// let route = Route::singleton(1);
/// assert!(insertion_cost(&instance, &route, 1, 2).abs() < 1e-10);
/// ```
pub fn insertion_cost(instance: &ProblemInstance, route: &Route, pos: usize, node: usize) -> f64 {
    let nodes = route.nodes();
    debug_assert!(pos >= 1 && pos <= nodes.len());

    let mut cursor = Cursor::start(instance);
    for &n in &nodes[1..pos] {
        cursor.advance(n);
    }
    let i = cursor.at();
    let j = nodes.get(pos).copied().unwrap_or(DEPOT);

    let mut old = cursor.clone();
    old.advance(j);
    let mut new = cursor;
    new.advance(node);
    new.advance(j);

    let service_start = |c: &Cursor<'_>| c.time() - instance.node(j).service_duration();
    let push_forward = service_start(&new) - service_start(&old);
    let detour = instance.distance(i, node) + instance.distance(node, j) - instance.distance(i, j);

    let params = instance.parameters();
    params.alpha1 * detour + params.alpha2 * push_forward
}

/// Insertion positions of `node` in `route`, closest predecessor first.
///
/// Covers `1..=route.len()` (the last one appends a new trip). With
/// `limit = Some(p)` only the `p` positions whose predecessor is nearest
/// to `node` are kept. Ties keep route order.
pub fn candidate_positions(
    instance: &ProblemInstance,
    route: &Route,
    node: usize,
    limit: Option<usize>,
) -> Vec<usize> {
    let nodes = route.nodes();
    let mut positions: Vec<usize> = (1..=nodes.len()).collect();
    if let Some(p) = limit {
        positions.sort_by(|&a, &b| {
            let da = instance.distance(nodes[a - 1], node);
            let db = instance.distance(nodes[b - 1], node);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });
        positions.truncate(p);
    }
    positions
}

/// Returns `true` if `node` may be placed at `pos` (`pos == len` appends).
pub fn is_feasible_insertion(
    instance: &ProblemInstance,
    route: &Route,
    pos: usize,
    node: usize,
) -> bool {
    if pos == route.len() {
        can_append_at_end(instance, route, node)
    } else {
        can_insert_at(instance, route, pos, node)
    }
}

/// Cheapest feasible placement of `node` in `route`, if any.
///
/// Only the candidate positions from [`candidate_positions`] are tried.
/// The first position reaching the minimum cost wins.
pub fn best_insertion(
    instance: &ProblemInstance,
    route: &Route,
    node: usize,
    limit: Option<usize>,
) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;
    for pos in candidate_positions(instance, route, node, limit) {
        if !is_feasible_insertion(instance, route, pos, node) {
            continue;
        }
        let cost = insertion_cost(instance, route, pos, node);
        if best.is_none_or(|b| cost < b.cost) {
            best = Some(Insertion {
                position: pos,
                cost,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Parameters, TimeWindow};

    fn instance(alpha1: f64, alpha2: f64) -> ProblemInstance {
        let depot = Customer::depot(0.0, 0.0)
            .with_time_window(TimeWindow::new(0.0, 1000.0).expect("valid"));
        let customers = vec![
            Customer::new(1, 10.0, 0.0, 5, 0.0),
            Customer::new(2, 5.0, 5.0, 5, 0.0),
            Customer::new(3, 5.0, 0.0, 5, 0.0),
            Customer::new(4, 0.0, 10.0, 5, 0.0)
                .with_time_window(TimeWindow::new(100.0, 200.0).expect("valid")),
        ];
        let params = Parameters::default().with_alphas(alpha1, alpha2);
        ProblemInstance::new(depot, customers, 10, params).expect("valid")
    }

    #[test]
    fn test_detour_only() {
        let inst = instance(1.0, 0.0);
        let route = Route::singleton(1);
        // d(0,2) + d(2,1) - d(0,1) = 2 * sqrt(50) - 10
        let expected = 2.0 * 50f64.sqrt() - 10.0;
        assert!((insertion_cost(&inst, &route, 1, 2) - expected).abs() < 1e-9);
        assert!((insertion_cost(&inst, &route, 2, 2) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_push_forward_only() {
        let inst = instance(0.0, 1.0);
        let route = Route::singleton(1);
        // Before: serve 1 at 10. After inserting 3 on the way: still 10.
        assert!(insertion_cost(&inst, &route, 1, 3).abs() < 1e-9);
        // Inserting 4 first waits until 100, then 1 is reached at 100 + sqrt(200).
        let expected = 100.0 + 200f64.sqrt() - 10.0;
        assert!((insertion_cost(&inst, &route, 1, 4) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_append_cost() {
        let inst = instance(1.0, 1.0);
        let route = Route::singleton(1);
        // new trip 0 -> 3 -> 0: detour 10, return time pushed by 10
        let cost = insertion_cost(&inst, &route, route.len(), 3);
        assert!((cost - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_candidate_positions_limit() {
        let inst = instance(1.0, 0.0);
        let route = Route::from_customers(&[1, 2]);
        let all = candidate_positions(&inst, &route, 3, None);
        assert_eq!(all, vec![1, 2, 3, 4]);
        // predecessors of 1..=4 are 0, 1, 2, 0; nearest to 3 (5,0) are 0/1/2 at 5.
        let limited = candidate_positions(&inst, &route, 3, Some(2));
        assert_eq!(limited, vec![1, 2]);
    }

    #[test]
    fn test_best_insertion_prefers_cheapest() {
        let inst = instance(1.0, 0.0);
        let route = Route::singleton(1);
        let best = best_insertion(&inst, &route, 3, None).expect("feasible");
        assert_eq!(best.position, 1);
        assert!(best.cost.abs() < 1e-9);
    }

    #[test]
    fn test_best_insertion_falls_back_to_new_trip() {
        let inst = instance(1.0, 0.0);
        let route = Route::from_customers(&[1, 3]);
        // capacity 10 is used up by 1 and 3
        let best = best_insertion(&inst, &route, 2, None).expect("feasible");
        assert!(best.is_append(&route));
        let mut r = route.clone();
        best.apply(&mut r, 2);
        assert_eq!(r.nodes(), &[0, 1, 3, 0, 2, 0]);
    }

    #[test]
    fn test_best_insertion_none_when_limited_to_infeasible() {
        let inst = instance(1.0, 0.0);
        let route = Route::from_customers(&[1, 3]);
        // only the nearest interior slot is tried and it is over capacity
        assert!(best_insertion(&inst, &route, 2, Some(1)).is_none());
    }
}
