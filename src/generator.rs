//! Seeded random instance generator.
//!
//! Customers are scattered over a square grid, half of them uniformly and
//! half around a few randomly placed centres. Every generated customer is
//! servable by a dedicated vehicle, so the result always passes
//! [`ProblemInstance::new`] validation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Customer, Parameters, ProblemInstance, TimeWindow};

/// Shape of the generated instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of customers (depot excluded).
    pub num_customers: usize,
    /// Vehicle capacity.
    pub capacity: i32,
    /// Side of the square grid; the depot sits at its centre.
    pub grid_size: f64,
    /// Service duration of every customer.
    pub service_time: f64,
    /// Largest single demand.
    pub max_demand: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_customers: 100,
            capacity: 200,
            grid_size: 1000.0,
            service_time: 10.0,
            max_demand: 35,
        }
    }
}

impl GeneratorConfig {
    /// Sets the customer count.
    pub fn with_num_customers(mut self, n: usize) -> Self {
        self.num_customers = n;
        self
    }

    /// Sets the vehicle capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Generates an instance from `seed`. The same seed and configuration
/// always give the same instance.
///
/// # Examples
///
/// ```
/// use mtvrptw::generator::{generate, GeneratorConfig};
/// use mtvrptw::models::Parameters;
///
/// let config = GeneratorConfig::default().with_num_customers(20);
/// let a = generate(&config, Parameters::default(), 7).unwrap();
/// let b = generate(&config, Parameters::default(), 7).unwrap();
/// assert_eq!(a.num_customers(), 20);
/// assert_eq!(a.nodes(), b.nodes());
/// ```
pub fn generate(
    config: &GeneratorConfig,
    parameters: Parameters,
    seed: u64,
) -> Result<ProblemInstance> {
    if config.capacity <= 0 || config.max_demand <= 0 {
        return Err(Error::invalid_instance(
            "capacity and maximum demand must be positive",
        ));
    }
    if !(config.grid_size.is_finite() && config.grid_size > 0.0)
        || !(config.service_time.is_finite() && config.service_time >= 0.0)
    {
        return Err(Error::invalid_instance(
            "grid size must be positive and service time non-negative",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let n = config.num_customers;
    let grid = config.grid_size;
    let centre = (grid / 2.0).round();
    let jitter = grid * 0.06;

    let num_centres = rng.random_range(3..=8usize).min(n);
    let mut positions: Vec<(f64, f64)> = Vec::with_capacity(n);
    while positions.len() < n {
        let pos = if positions.len() < num_centres || rng.random::<f64>() < 0.5 {
            (rng.random_range(0.0..=grid), rng.random_range(0.0..=grid))
        } else {
            let (cx, cy) = positions[rng.random_range(0..num_centres)];
            (
                (cx + rng.random_range(-jitter..=jitter)).clamp(0.0, grid),
                (cy + rng.random_range(-jitter..=jitter)).clamp(0.0, grid),
            )
        };
        positions.push((pos.0.round(), pos.1.round()));
    }

    let max_demand = config.max_demand.min(config.capacity);
    let demands: Vec<i32> = (0..n).map(|_| rng.random_range(1..=max_demand)).collect();

    let origin = Customer::depot(centre, centre);
    let depot_distance = |(x, y): (f64, f64)| origin.distance_to(&Customer::new(0, x, y, 0, 0.0));
    let furthest = positions.iter().copied().map(depot_distance).fold(0.0, f64::max);
    let average_demand = if n == 0 {
        1.0
    } else {
        demands.iter().sum::<i32>() as f64 / n as f64
    };
    let average_route_size = config.capacity as f64 / average_demand;
    let average_distance = (grid / 4.0) * 0.5214;
    let horizon = (2.0 * furthest).ceil()
        + config.service_time.ceil()
        + ((average_distance + config.service_time) * average_route_size).ceil()
        + 2.0;

    let depot = origin
        .clone()
        .with_time_window(TimeWindow::new(0.0, horizon).unwrap_or_default());

    let mut customers = Vec::with_capacity(n);
    for (idx, (&(x, y), &demand)) in positions.iter().zip(&demands).enumerate() {
        let to_depot = depot_distance((x, y));
        let min_due = (to_depot + config.service_time).ceil();
        let max_due = (horizon - to_depot).floor();
        let due = rng.random_range(min_due..=max_due).round();
        let ready = if rng.random::<f64>() < 0.5 {
            let width = rng.random_range(10.0..=60.0);
            (due - config.service_time - width).max(0.0).floor()
        } else {
            0.0
        };
        let tw = TimeWindow::new(ready, due).unwrap_or_default();
        customers.push(
            Customer::new(idx + 1, x, y, demand, config.service_time).with_time_window(tw),
        );
    }

    ProblemInstance::new(depot, customers, config.capacity, parameters)
}
