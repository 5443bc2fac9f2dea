//! Lexicographic solution ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{ProblemInstance, Solution};

/// Secondary criterion applied when two solutions use the same number of
/// routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreak {
    /// Prefer the solution whose shortest route (depot visits included)
    /// is shorter: that route is the next one likely to be emptied.
    #[default]
    ShortestRoute,
    /// Prefer the solution with less total travelled distance.
    TotalDistance,
}

/// Orders solutions by route count, then by `tie_break`.
/// `Ordering::Less` means `a` is better.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, Route, Solution};
/// use mtvrptw::evaluation::{compare_solutions, TieBreak};
///
/// let depot = Customer::depot(0.0, 0.0);
/// let customers = (1..=3).map(|i| Customer::new(i, i as f64, 0.0, 1, 0.0)).collect();
/// let instance = ProblemInstance::new(depot, customers, 10, Parameters::default()).unwrap();
///
/// let a = Solution::from_routes(vec![Route::from_customers(&[1, 2, 3])]);
/// let b = Solution::from_routes(vec![Route::from_customers(&[1, 2]), Route::singleton(3)]);
/// assert_eq!(compare_solutions(&instance, &a, &b, TieBreak::ShortestRoute), Ordering::Less);
/// ```
pub fn compare_solutions(
    instance: &ProblemInstance,
    a: &Solution,
    b: &Solution,
    tie_break: TieBreak,
) -> Ordering {
    a.num_routes()
        .cmp(&b.num_routes())
        .then_with(|| match tie_break {
            TieBreak::ShortestRoute => a.shortest_route_len().cmp(&b.shortest_route_len()),
            TieBreak::TotalDistance => a
                .total_distance(instance.distances())
                .total_cmp(&b.total_distance(instance.distances())),
        })
}

/// Returns `true` if `candidate` is strictly better than `incumbent`.
pub fn is_better(
    instance: &ProblemInstance,
    candidate: &Solution,
    incumbent: &Solution,
    tie_break: TieBreak,
) -> bool {
    compare_solutions(instance, candidate, incumbent, tie_break) == Ordering::Less
}
