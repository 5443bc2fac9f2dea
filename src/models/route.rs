//! Multi-trip route type.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// Node index of the depot in every instance.
pub const DEPOT: usize = 0;

/// The working day of one vehicle: an ordered sequence of node indices
/// that starts and ends at the depot.
///
/// Interior depot visits split the day into trips; the vehicle unloads
/// there and starts the next trip empty. The empty route is `[0, 0]`.
/// Routes hold indices into the instance's node table, so cloning one is
/// a plain vector copy.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::Route;
///
/// let mut route = Route::singleton(3);
/// route.insert_at(1, 5);
/// route.append_trip(7);
/// assert_eq!(route.nodes(), &[0, 5, 3, 0, 7, 0]);
/// assert_eq!(route.num_trips(), 2);
/// assert_eq!(route.customer_ids(), vec![5, 3, 7]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<usize>,
}

impl Route {
    /// Creates the empty route `[0, 0]`.
    pub fn new() -> Self {
        Self {
            nodes: vec![DEPOT, DEPOT],
        }
    }

    /// Creates the single-customer route `[0, customer, 0]`.
    pub fn singleton(customer: usize) -> Self {
        Self {
            nodes: vec![DEPOT, customer, DEPOT],
        }
    }

    /// Creates a single-trip route visiting `customers` in order.
    pub fn from_customers(customers: &[usize]) -> Self {
        let mut nodes = Vec::with_capacity(customers.len() + 2);
        nodes.push(DEPOT);
        nodes.extend_from_slice(customers);
        nodes.push(DEPOT);
        Self { nodes }
    }

    /// Wraps a raw node sequence. No checks are made here; use
    /// [`crate::evaluation::validate_route`] to verify the result.
    pub fn from_nodes(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// The full node sequence, depot visits included.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of stops including every depot visit.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the route serves no customer.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|&n| n == DEPOT)
    }

    /// Node at position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    pub fn node_at(&self, pos: usize) -> usize {
        self.nodes[pos]
    }

    /// Customer IDs in visit order, depot visits skipped.
    pub fn customer_ids(&self) -> Vec<usize> {
        self.customers().collect()
    }

    /// Iterates the customers in visit order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().copied().filter(|&n| n != DEPOT)
    }

    /// Number of customers served.
    pub fn num_customers(&self) -> usize {
        self.customers().count()
    }

    /// Number of depot-to-depot trips.
    pub fn num_trips(&self) -> usize {
        self.nodes
            .iter()
            .filter(|&&n| n == DEPOT)
            .count()
            .saturating_sub(1)
    }

    /// Inserts `node` so that it ends up at index `pos`.
    ///
    /// `pos` must lie in `1..self.len()`: never before the opening depot
    /// and never after the closing one.
    pub fn insert_at(&mut self, pos: usize, node: usize) {
        debug_assert!(pos >= 1 && pos < self.nodes.len());
        self.nodes.insert(pos, node);
    }

    /// Appends `node` as a new trip after the closing depot.
    pub fn append_trip(&mut self, node: usize) {
        self.nodes.push(node);
        self.nodes.push(DEPOT);
    }

    /// Removes the customer at `pos` and returns it.
    ///
    /// A trip left empty by the removal is collapsed, so the route never
    /// holds two consecutive depot visits other than the empty route
    /// itself. Returns `None` if `pos` is not a customer position.
    pub fn remove_at(&mut self, pos: usize) -> Option<usize> {
        if pos == 0 || pos + 1 >= self.nodes.len() || self.nodes[pos] == DEPOT {
            return None;
        }
        let node = self.nodes.remove(pos);
        if self.nodes.len() > 2 && self.nodes[pos - 1] == DEPOT && self.nodes[pos] == DEPOT {
            self.nodes.remove(pos);
        }
        Some(node)
    }

    /// Total travelled distance.
    pub fn distance(&self, distances: &DistanceMatrix) -> f64 {
        distances.path_length(&self.nodes)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    #[test]
    fn test_route_empty() {
        let r = Route::new();
        assert!(r.is_empty());
        assert_eq!(r.len(), 2);
        assert_eq!(r.num_trips(), 1);
        assert_eq!(r.num_customers(), 0);
    }

    #[test]
    fn test_insert_and_append() {
        let mut r = Route::from_customers(&[1, 2]);
        r.insert_at(3, 4);
        assert_eq!(r.nodes(), &[0, 1, 2, 4, 0]);
        r.append_trip(9);
        assert_eq!(r.nodes(), &[0, 1, 2, 4, 0, 9, 0]);
        assert_eq!(r.num_trips(), 2);
        assert_eq!(r.num_customers(), 4);
    }

    #[test]
    fn test_remove_collapses_empty_trip() {
        let mut r = Route::from_nodes(vec![0, 1, 0, 2, 0]);
        assert_eq!(r.remove_at(1), Some(1));
        assert_eq!(r.nodes(), &[0, 2, 0]);

        let mut r = Route::from_nodes(vec![0, 1, 0, 2, 0]);
        assert_eq!(r.remove_at(3), Some(2));
        assert_eq!(r.nodes(), &[0, 1, 0]);
    }

    #[test]
    fn test_remove_last_customer_leaves_empty_route() {
        let mut r = Route::singleton(4);
        assert_eq!(r.remove_at(1), Some(4));
        assert_eq!(r.nodes(), &[0, 0]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_remove_rejects_depot_positions() {
        let mut r = Route::from_nodes(vec![0, 1, 0, 2, 0]);
        assert_eq!(r.remove_at(0), None);
        assert_eq!(r.remove_at(2), None);
        assert_eq!(r.remove_at(4), None);
        assert_eq!(r.len(), 5);
    }

    #[test]
    fn test_distance() {
        let dm = DistanceMatrix::from_nodes(&[
            Customer::depot(0.0, 0.0),
            Customer::new(1, 3.0, 0.0, 1, 0.0),
            Customer::new(2, 0.0, 4.0, 1, 0.0),
        ]);
        let r = Route::from_customers(&[1, 2]);
        assert!((r.distance(&dm) - 12.0).abs() < 1e-10);
        assert!((Route::from_nodes(vec![0, 1, 0, 2, 0]).distance(&dm) - 14.0).abs() < 1e-10);
        assert_eq!(Route::new().distance(&dm), 0.0);
    }
}
