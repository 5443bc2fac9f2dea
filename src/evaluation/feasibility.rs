//! Capacity and time-window feasibility primitives.
//!
//! None of these functions mutate the route; a rejected placement is a
//! plain `false`.

use crate::models::{ProblemInstance, Route, DEPOT};

/// Forward time/load propagation along a node sequence.
///
/// Starts at the opening depot at the depot's ready time. Every call to
/// [`Cursor::advance`] moves the vehicle to the next stop, waits for the
/// window to open, serves, and reports whether the stop stays feasible.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    instance: &'a ProblemInstance,
    at: usize,
    time: f64,
    load: i32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn start(instance: &'a ProblemInstance) -> Self {
        let depot = instance.depot();
        Self {
            instance,
            at: DEPOT,
            time: depot.ready() + depot.service_duration(),
            load: 0,
        }
    }

    /// Current node.
    pub(crate) fn at(&self) -> usize {
        self.at
    }

    /// Departure time from the current node.
    pub(crate) fn time(&self) -> f64 {
        self.time
    }

    /// Load carried on the current trip.
    #[cfg(test)]
    pub(crate) fn load(&self) -> i32 {
        self.load
    }

    /// Travels to `next` and serves it. The state is always updated; the
    /// return value is `false` if the stop misses its window or the trip
    /// goes over capacity.
    pub(crate) fn advance(&mut self, next: usize) -> bool {
        let node = self.instance.node(next);
        let arrival = self.time + self.instance.travel_time(self.at, next);
        let finish = node.time_window().service_start(arrival) + node.service_duration();
        let on_time = !node.time_window().is_violated(finish);

        let within_capacity = if next == DEPOT {
            self.load = 0;
            true
        } else {
            self.load += node.demand();
            self.load <= self.instance.capacity()
        };

        self.time = finish;
        self.at = next;
        on_time && within_capacity
    }

    /// Advances through every node of `nodes`, stopping at the first
    /// infeasible stop.
    pub(crate) fn advance_all(&mut self, nodes: &[usize]) -> bool {
        nodes.iter().all(|&n| self.advance(n))
    }
}

/// Returns `true` if inserting `node` so that it lands at index `pos`
/// keeps the whole route feasible.
///
/// `pos` ranges over `1..route.len()`; the slot after the closing depot
/// is handled by [`can_append_at_end`]. Times are recomputed forward from
/// the insertion point and the trip containing it is re-checked against
/// capacity.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, Route, TimeWindow};
/// use mtvrptw::evaluation::can_insert_at;
///
/// let depot = Customer::depot(0.0, 0.0)
///     .with_time_window(TimeWindow::new(0.0, 100.0).unwrap());
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 10, 0.0),
///     Customer::new(2, 2.0, 0.0, 10, 0.0),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 15, Parameters::default()).unwrap();
///
/// let route = Route::singleton(1);
/// // 10 + 10 > 15: the trip would be over capacity.
/// assert!(!can_insert_at(&instance, &route, 2, 2));
/// ```
pub fn can_insert_at(instance: &ProblemInstance, route: &Route, pos: usize, node: usize) -> bool {
    let nodes = route.nodes();
    if node == DEPOT || node > instance.num_customers() || pos == 0 || pos >= nodes.len() {
        return false;
    }
    let mut cursor = Cursor::start(instance);
    cursor.advance_all(&nodes[1..pos]) && cursor.advance(node) && cursor.advance_all(&nodes[pos..])
}

/// Returns `true` if `node` can be served on a new trip appended after
/// the closing depot, i.e. immediately before a fresh closing depot.
pub fn can_append_at_end(instance: &ProblemInstance, route: &Route, node: usize) -> bool {
    if node == DEPOT || node > instance.num_customers() {
        return false;
    }
    let mut cursor = Cursor::start(instance);
    cursor.advance_all(&route.nodes()[1..]) && cursor.advance(node) && cursor.advance(DEPOT)
}

/// Returns `true` if `route` is well formed and satisfies capacity on
/// every trip and the time window at every stop, depot visits included.
pub fn is_route_feasible(instance: &ProblemInstance, route: &Route) -> bool {
    let nodes = route.nodes();
    if nodes.len() < 2 || nodes[0] != DEPOT || nodes[nodes.len() - 1] != DEPOT {
        return false;
    }
    if nodes.iter().any(|&n| n > instance.num_customers()) {
        return false;
    }
    Cursor::start(instance).advance_all(&nodes[1..])
}
