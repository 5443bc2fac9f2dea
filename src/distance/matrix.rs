//! Pairwise distances between the nodes of one instance.

use crate::models::Customer;

/// Euclidean distances between every pair of nodes of an instance, depot
/// at index 0.
///
/// Distances are symmetric, so only pairs `i < j` are stored. Vehicles
/// travel at unit speed and the same table answers travel-time queries.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance};
///
/// let customers = vec![
///     Customer::new(1, 3.0, 4.0, 10, 5.0),
///     Customer::new(2, 6.0, 8.0, 20, 5.0),
/// ];
/// let instance =
///     ProblemInstance::new(Customer::depot(0.0, 0.0), customers, 50, Parameters::default())
///         .unwrap();
///
/// let dm = instance.distances();
/// assert!((dm.get(0, 2) - 10.0).abs() < 1e-10);
/// assert_eq!(dm.get(2, 1), dm.get(1, 2));
/// assert!((dm.path_length(&[0, 1, 0, 2, 0]) - 30.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    num_nodes: usize,
    upper: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the table for an instance's node list.
    pub(crate) fn from_nodes(nodes: &[Customer]) -> Self {
        let num_nodes = nodes.len();
        let mut upper = Vec::with_capacity(num_nodes * num_nodes.saturating_sub(1) / 2);
        for (i, from) in nodes.iter().enumerate() {
            upper.extend(nodes[i + 1..].iter().map(|to| from.distance_to(to)));
        }
        Self { num_nodes, upper }
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        // Row i holds the num_nodes - 1 - i pairs (i, i+1..num_nodes).
        i * (2 * self.num_nodes - i - 1) / 2 + (j - i - 1)
    }

    /// Distance between nodes `from` and `to`.
    ///
    /// Both indices must be below the instance's node count.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        debug_assert!(from < self.num_nodes && to < self.num_nodes);
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.upper[self.offset(from, to)],
            std::cmp::Ordering::Greater => self.upper[self.offset(to, from)],
        }
    }

    /// Travel time between nodes `from` and `to`.
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }

    /// Length of a node sequence, such as a multi-trip route.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
