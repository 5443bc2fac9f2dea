//! Customer (node) and time window types.

use serde::{Deserialize, Serialize};

/// A time window constraint for service at a node.
///
/// Service may not begin before `ready` (the vehicle waits if early) and
/// must be finished by `due`.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.ready() <= tw.due());
/// assert_eq!(tw.service_start(80.0), 100.0);
/// assert!(tw.is_violated(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// A window that never binds: `[0, f64::MAX]`.
    pub fn unbounded() -> Self {
        Self {
            ready: 0.0,
            due: f64::MAX,
        }
    }

    /// Earliest time service may begin.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest time service may be finished.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Service start for a vehicle arriving at `arrival`.
    pub fn service_start(&self, arrival: f64) -> f64 {
        arrival.max(self.ready)
    }

    /// Returns `true` if finishing service at `finish` misses the window.
    pub fn is_violated(&self, finish: f64) -> bool {
        finish > self.due
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// A customer (or the depot) in a routing problem.
///
/// Node 0 is the depot. Nodes carry a location, a demand, a time window,
/// and a service duration, and are never mutated once an instance is built.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, TimeWindow};
///
/// let depot = Customer::depot(35.0, 35.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Customer::new(1, 41.0, 49.0, 10, 10.0)
///     .with_time_window(TimeWindow::new(161.0, 171.0).unwrap());
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.time_window().due(), 171.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    service_duration: f64,
    time_window: TimeWindow,
}

impl Customer {
    /// Creates a new customer with an unbounded time window.
    pub fn new(id: usize, x: f64, y: f64, demand: i32, service_duration: f64) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            service_duration,
            time_window: TimeWindow::unbounded(),
        }
    }

    /// Creates a depot at the given coordinates (id=0, demand=0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0, 0.0)
    }

    /// Sets the time window for this node.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// Node ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand at this node.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Service duration at this node.
    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    /// Time window constraint.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    /// Shorthand for `time_window().ready()`.
    pub fn ready(&self) -> f64 {
        self.time_window.ready
    }

    /// Shorthand for `time_window().due()`.
    pub fn due(&self) -> f64 {
        self.time_window.due
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
