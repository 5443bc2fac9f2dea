//! Problem instance.

use super::{Customer, Parameters, DEPOT};
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

/// A fully-populated MTVRPTW instance: depot, customers, a homogeneous
/// vehicle capacity, and the heuristic parameters.
///
/// Immutable once built, so it can be shared freely across worker threads.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, TimeWindow};
///
/// let depot = Customer::depot(0.0, 0.0)
///     .with_time_window(TimeWindow::new(0.0, 100.0).unwrap());
/// let customers = vec![
///     Customer::new(1, 3.0, 4.0, 10, 2.0),
///     Customer::new(2, 6.0, 8.0, 20, 2.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 50, Parameters::default()).unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    nodes: Vec<Customer>,
    distances: DistanceMatrix,
    capacity: i32,
    parameters: Parameters,
}

impl ProblemInstance {
    /// Builds an instance, validating it.
    ///
    /// Customers must be numbered `1..=n` in order. Every customer must be
    /// servable on its own (`depot -> customer -> depot` within capacity
    /// and time windows); otherwise no feasible solution exists and
    /// [`Error::UnservableCustomer`] is returned.
    pub fn new(
        depot: Customer,
        customers: Vec<Customer>,
        capacity: i32,
        parameters: Parameters,
    ) -> Result<Self> {
        parameters.validate()?;
        if depot.id() != DEPOT || depot.demand() != 0 {
            return Err(Error::invalid_instance(
                "depot must have id 0 and zero demand",
            ));
        }
        if capacity <= 0 {
            return Err(Error::invalid_instance(format!(
                "vehicle capacity must be positive, got {capacity}"
            )));
        }

        let mut nodes = Vec::with_capacity(customers.len() + 1);
        nodes.push(depot);
        nodes.extend(customers);

        for (index, node) in nodes.iter().enumerate() {
            if node.id() != index {
                return Err(Error::invalid_instance(format!(
                    "node at position {index} has id {}",
                    node.id()
                )));
            }
            if !node.x().is_finite() || !node.y().is_finite() {
                return Err(Error::invalid_instance(format!(
                    "node {index} has non-finite coordinates"
                )));
            }
            if node.demand() < 0 || node.service_duration() < 0.0 {
                return Err(Error::invalid_instance(format!(
                    "node {index} has negative demand or service duration"
                )));
            }
        }

        let distances = DistanceMatrix::from_nodes(&nodes);
        let instance = Self {
            nodes,
            distances,
            capacity,
            parameters,
        };
        for id in instance.customer_ids() {
            instance.check_servable(id)?;
        }
        Ok(instance)
    }

    fn check_servable(&self, id: usize) -> Result<()> {
        let customer = &self.nodes[id];
        if customer.demand() > self.capacity {
            return Err(Error::UnservableCustomer {
                customer: id,
                reason: format!(
                    "demand {} exceeds capacity {}",
                    customer.demand(),
                    self.capacity
                ),
            });
        }
        let depot = self.depot();
        let arrival = depot.ready() + depot.service_duration() + self.travel_time(DEPOT, id);
        let finish = customer.time_window().service_start(arrival) + customer.service_duration();
        if customer.time_window().is_violated(finish) {
            return Err(Error::UnservableCustomer {
                customer: id,
                reason: format!(
                    "earliest service end {finish} is after due time {}",
                    customer.due()
                ),
            });
        }
        let back = finish + self.travel_time(id, DEPOT);
        let depot_finish = depot.time_window().service_start(back) + depot.service_duration();
        if depot.time_window().is_violated(depot_finish) {
            return Err(Error::UnservableCustomer {
                customer: id,
                reason: format!(
                    "return to depot at {depot_finish} is after depot due time {}",
                    depot.due()
                ),
            });
        }
        Ok(())
    }

    /// All nodes (index 0 = depot, 1..=N = customers).
    pub fn nodes(&self) -> &[Customer] {
        &self.nodes
    }

    /// The node with index `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn node(&self, id: usize) -> &Customer {
        &self.nodes[id]
    }

    /// The depot.
    pub fn depot(&self) -> &Customer {
        &self.nodes[DEPOT]
    }

    /// Customers only, depot excluded.
    pub fn customers(&self) -> &[Customer] {
        &self.nodes[1..]
    }

    /// Customer IDs `1..=N`.
    pub fn customer_ids(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.num_customers()
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Vehicle capacity, identical for the whole fleet.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Heuristic parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Precomputed Euclidean distances.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Euclidean distance between two nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Travel time between two nodes (unit speed, so equal to distance).
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.distances.travel_time(from, to)
    }
}
