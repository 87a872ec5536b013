//! Route and visit types.

/// One stop of a route with its simulated schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Index of the customer in the problem.
    pub customer: usize,
    /// Time the vehicle reaches the customer.
    pub arrival_time: f64,
    /// Time service begins (after any waiting for the window to open).
    pub service_start: f64,
    /// Time the vehicle leaves (service start + service duration).
    pub departure_time: f64,
    /// Cumulative load delivered up to and including this stop.
    pub load_after: i32,
}

/// The ordered stops of one vehicle. The depot is implicit at both ends.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::{Route, Visit};
///
/// let mut route = Route::new(2);
/// route.push_visit(Visit {
///     customer: 4,
///     arrival_time: 5.0,
///     service_start: 10.0,
///     departure_time: 20.0,
///     load_after: 10,
/// });
/// assert_eq!(route.customers(), vec![4]);
/// assert_eq!(route.total_load(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    vehicle: usize,
    visits: Vec<Visit>,
    total_distance: f64,
    total_duration: f64,
    total_load: i32,
}

impl Route {
    /// Creates an empty route for the vehicle with the given index.
    pub fn new(vehicle: usize) -> Self {
        Self {
            vehicle,
            visits: Vec::new(),
            total_distance: 0.0,
            total_duration: 0.0,
            total_load: 0,
        }
    }

    /// Appends a stop to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.total_load = visit.load_after;
        self.visits.push(visit);
    }

    /// Index of the vehicle driving this route.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Customer indices in visiting order.
    pub fn customers(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.customer).collect()
    }

    /// Length of `depot → stops… → depot`.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Time the vehicle is back at the depot.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Total demand delivered on this route.
    pub fn total_load(&self) -> i32 {
        self.total_load
    }

    pub(crate) fn set_totals(&mut self, distance: f64, duration: f64) {
        self.total_distance = distance;
        self.total_duration = duration;
    }
}
