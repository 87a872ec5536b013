//! Customer and time window types.

/// The interval `[ready, due]` during which service at a customer may begin.
///
/// Arriving before `ready` is allowed: the vehicle waits, and waiting is free.
/// Starting service after `due` makes the route infeasible.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert_eq!(tw.service_start(40.0), 100.0);
/// assert_eq!(tw.service_start(150.0), 150.0);
/// assert!(tw.is_violated(200.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
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

    /// Earliest time service may begin.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest time service may begin.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Time at which service begins for a vehicle arriving at `arrival`.
    pub fn service_start(&self, arrival: f64) -> f64 {
        arrival.max(self.ready)
    }

    /// Returns `true` if service starting at `start` is too late.
    pub fn is_violated(&self, start: f64) -> bool {
        start > self.due
    }
}

/// A customer (or the depot) of a VRPTW instance.
///
/// By convention the record at index 0 of an instance is the depot. A
/// customer without a time window can be served at any time.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::{Customer, TimeWindow};
///
/// let depot = Customer::depot(35.0, 35.0);
/// assert!(depot.is_depot());
///
/// let c = Customer::new(1, 41.0, 49.0, 10, 10.0)
///     .with_time_window(TimeWindow::new(161.0, 171.0).unwrap());
/// assert_eq!(c.demand(), 10);
/// assert_eq!(c.time_window().map(|tw| tw.due()), Some(171.0));
/// ```
#[derive(Debug, Clone)]
pub struct Customer {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    service_duration: f64,
    time_window: Option<TimeWindow>,
}

impl Customer {
    /// Creates a customer without a time window.
    pub fn new(id: usize, x: f64, y: f64, demand: i32, service_duration: f64) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            service_duration,
            time_window: None,
        }
    }

    /// Creates a depot at the given coordinates (id 0, no demand, no service).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0, 0.0)
    }

    /// Sets the service time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Identifier as given in the instance file.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns `true` for the depot record.
    pub fn is_depot(&self) -> bool {
        self.id == 0 && self.demand == 0
    }

    /// Coordinates as an `(x, y)` pair.
    pub fn location(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Units delivered to this customer.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Time spent serving this customer once service begins.
    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    /// Service start for a vehicle arriving at `arrival`, or `None` if the
    /// window has already closed.
    pub fn try_serve(&self, arrival: f64) -> Option<f64> {
        match &self.time_window {
            Some(tw) => {
                let start = tw.service_start(arrival);
                (!tw.is_violated(start)).then_some(start)
            }
            None => Some(arrival),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_rejects_inverted_bounds() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(0.0, f64::INFINITY).is_none());
        assert!(TimeWindow::new(10.0, 10.0).is_some());
    }

    #[test]
    fn test_service_start_waits_for_ready() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.service_start(3.0), 10.0);
        assert_eq!(tw.service_start(10.0), 10.0);
        assert_eq!(tw.service_start(17.5), 17.5);
    }

    #[test]
    fn test_due_is_inclusive() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(!tw.is_violated(20.0));
        assert!(tw.is_violated(20.001));
    }

    #[test]
    fn test_try_serve() {
        let c = Customer::new(3, 1.0, 1.0, 5, 2.0)
            .with_time_window(TimeWindow::new(10.0, 20.0).expect("valid"));
        assert_eq!(c.try_serve(4.0), Some(10.0));
        assert_eq!(c.try_serve(12.0), Some(12.0));
        assert_eq!(c.try_serve(21.0), None);
    }

    #[test]
    fn test_try_serve_without_window() {
        let c = Customer::new(1, 0.0, 0.0, 1, 0.0);
        assert_eq!(c.try_serve(1e9), Some(1e9));
    }

    #[test]
    fn test_depot() {
        let d = Customer::depot(35.0, 35.0);
        assert!(d.is_depot());
        assert_eq!(d.location(), (35.0, 35.0));
        assert_eq!(d.service_duration(), 0.0);
        assert!(!Customer::new(1, 0.0, 0.0, 10, 0.0).is_depot());
    }
}
