//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;
use crate::distance::DistanceMatrix;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A trip carries more than the vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Trip index within the route.
        trip: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Service at a stop finishes after its window closes.
    TimeWindowViolated {
        /// Route index in the solution.
        route_index: usize,
        /// Node where the violation occurred.
        node_id: usize,
        /// Time at which service finishes.
        finish: f64,
        /// Time window due date.
        due: f64,
    },
    /// The route does not start and end at the depot.
    MalformedRoute {
        /// Route index in the solution.
        route_index: usize,
    },
    /// The route references a node the instance does not have.
    UnknownNode {
        /// Route index in the solution.
        route_index: usize,
        /// Offending node index.
        node_id: usize,
    },
    /// A customer is served by no route.
    MissingCustomer {
        /// Customer ID.
        customer_id: usize,
    },
    /// A customer is served more than once.
    DuplicateCustomer {
        /// Customer ID.
        customer_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// Returns a copy of this violation attributed to `route_index`.
    pub fn in_route(mut self, index: usize) -> Self {
        match &mut self.kind {
            ViolationType::CapacityExceeded { route_index, .. }
            | ViolationType::TimeWindowViolated { route_index, .. }
            | ViolationType::MalformedRoute { route_index }
            | ViolationType::UnknownNode { route_index, .. } => *route_index = index,
            ViolationType::MissingCustomer { .. } | ViolationType::DuplicateCustomer { .. } => {}
        }
        self
    }
}

/// A set of routes, one per vehicle.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_customers(&[1, 2]));
/// sol.add_route(Route::singleton(3));
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// assert_eq!(sol.shortest_route_len(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Creates a solution from the given routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Removes and returns the route at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_route(&mut self, index: usize) -> Route {
        self.routes.remove(index)
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the solution, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the solution has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.num_customers()).sum()
    }

    /// Length of the shortest route, depot visits included.
    ///
    /// `None` for a solution without routes.
    pub fn shortest_route_len(&self) -> Option<usize> {
        self.routes.iter().map(|r| r.len()).min()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self, distances: &DistanceMatrix) -> f64 {
        self.routes.iter().map(|r| r.distance(distances)).sum()
    }
}

impl FromIterator<Route> for Solution {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self::from_routes(iter.into_iter().collect())
    }
}
