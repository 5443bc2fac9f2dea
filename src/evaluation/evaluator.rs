//! Route evaluator that computes timing, load, and feasibility.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{ProblemInstance, Route, Solution, Violation, ViolationType, DEPOT};

/// A single stop within an evaluated route.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Node being visited (0 = depot).
    pub node_id: usize,
    /// Arrival time at this node.
    pub arrival_time: f64,
    /// Service start (arrival plus waiting).
    pub service_start: f64,
    /// Departure time (service start + service duration).
    pub departure_time: f64,
    /// Load carried on the current trip after this visit.
    pub load_after: i32,
}

/// Timing and load of every stop of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSchedule {
    /// One entry per stop, opening depot included.
    pub visits: Vec<Visit>,
    /// Travelled distance.
    pub total_distance: f64,
    /// Time at which the vehicle finishes its day.
    pub end_time: f64,
}

/// Evaluates routes against an instance: timing, per-trip load, and
/// constraint violations.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, Route};
/// use mtvrptw::evaluation::RouteEvaluator;
///
/// let depot = Customer::depot(0.0, 0.0);
/// let customers = vec![
///     Customer::new(1, 3.0, 4.0, 10, 5.0),
///     Customer::new(2, 6.0, 8.0, 20, 5.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 100, Parameters::default()).unwrap();
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let schedule = evaluator.schedule(&Route::from_customers(&[1, 2]));
/// assert_eq!(schedule.visits.len(), 4);
/// assert!((schedule.total_distance - 20.0).abs() < 1e-10);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Computes arrival, service start, departure and trip load at every
    /// stop. Violations are not reported here; see [`Self::route_violations`].
    ///
    /// # Panics
    ///
    /// Panics if the route references a node outside the instance.
    pub fn schedule(&self, route: &Route) -> RouteSchedule {
        let depot = self.instance.depot();
        let start = depot.ready();
        let mut current_time = start + depot.service_duration();
        let mut current_load = 0;
        let mut total_distance = 0.0;

        let mut visits = Vec::with_capacity(route.len());
        visits.push(Visit {
            node_id: DEPOT,
            arrival_time: start,
            service_start: start,
            departure_time: current_time,
            load_after: 0,
        });

        for w in route.nodes().windows(2) {
            let (prev, next) = (w[0], w[1]);
            let node = self.instance.node(next);
            let travel = self.instance.travel_time(prev, next);
            total_distance += self.instance.distance(prev, next);

            let arrival = current_time + travel;
            let service_start = node.time_window().service_start(arrival);
            let departure = service_start + node.service_duration();
            current_load = if next == DEPOT {
                0
            } else {
                current_load + node.demand()
            };

            visits.push(Visit {
                node_id: next,
                arrival_time: arrival,
                service_start,
                departure_time: departure,
                load_after: current_load,
            });
            current_time = departure;
        }

        RouteSchedule {
            visits,
            total_distance,
            end_time: current_time,
        }
    }

    /// Lists every constraint the route breaks. Violations carry route
    /// index 0; [`Self::validate_solution`] re-attributes them.
    pub fn route_violations(&self, route: &Route) -> Vec<Violation> {
        let mut violations = Vec::new();
        let nodes = route.nodes();

        if let Some(&node_id) = nodes.iter().find(|&&n| n > self.instance.num_customers()) {
            violations.push(Violation::new(ViolationType::UnknownNode {
                route_index: 0,
                node_id,
            }));
            return violations;
        }
        if nodes.len() < 2 || nodes[0] != DEPOT || nodes[nodes.len() - 1] != DEPOT {
            violations.push(Violation::new(ViolationType::MalformedRoute { route_index: 0 }));
            return violations;
        }

        let schedule = self.schedule(route);
        let mut trip = 0;
        let mut trip_load = 0;
        for visit in &schedule.visits[1..] {
            let node = self.instance.node(visit.node_id);
            if node.time_window().is_violated(visit.departure_time) {
                violations.push(Violation::new(ViolationType::TimeWindowViolated {
                    route_index: 0,
                    node_id: visit.node_id,
                    finish: visit.departure_time,
                    due: node.due(),
                }));
            }
            if visit.node_id == DEPOT {
                if trip_load > self.instance.capacity() {
                    violations.push(Violation::new(ViolationType::CapacityExceeded {
                        route_index: 0,
                        trip,
                        load: trip_load,
                        capacity: self.instance.capacity(),
                    }));
                }
                trip += 1;
            }
            trip_load = visit.load_after;
        }

        violations
    }

    /// Checks a whole solution: every route feasible and every customer
    /// served exactly once. An empty list means the solution is valid.
    pub fn validate_solution(&self, solution: &Solution) -> Vec<Violation> {
        let mut all_violations = Vec::new();
        let mut served: HashMap<usize, usize> = HashMap::new();

        for (idx, route) in solution.routes().iter().enumerate() {
            all_violations.extend(
                self.route_violations(route)
                    .into_iter()
                    .map(|v| v.in_route(idx)),
            );
            for customer in route.customers() {
                *served.entry(customer).or_default() += 1;
            }
        }

        for customer_id in self.instance.customer_ids() {
            match served.get(&customer_id).copied().unwrap_or(0) {
                0 => all_violations.push(Violation::new(ViolationType::MissingCustomer {
                    customer_id,
                })),
                1 => {}
                _ => all_violations.push(Violation::new(ViolationType::DuplicateCustomer {
                    customer_id,
                })),
            }
        }

        all_violations
    }
}

/// Shorthand for [`RouteEvaluator::route_violations`].
pub fn validate_route(instance: &ProblemInstance, route: &Route) -> Vec<Violation> {
    RouteEvaluator::new(instance).route_violations(route)
}

/// Shorthand for [`RouteEvaluator::validate_solution`].
pub fn validate_solution(instance: &ProblemInstance, solution: &Solution) -> Vec<Violation> {
    RouteEvaluator::new(instance).validate_solution(solution)
}

/// Fails with [`Error::InvariantViolation`] unless `solution` is valid.
///
/// Used as the post-condition of every phase that mutates routes; a
/// failure means a logic defect, never a bad instance.
pub fn ensure_valid(instance: &ProblemInstance, solution: &Solution, context: &str) -> Result<()> {
    let violations = validate_solution(instance, solution);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::invariant(context, violations))
    }
}
