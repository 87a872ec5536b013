//! Capacity and time-window feasibility of routes under construction.
//!
//! A route is simulated from the depot at time zero. For every stop the
//! travel time from the previous stop is added to the clock; an early vehicle
//! waits for the window to open, a late one makes the route infeasible, and
//! the service duration is added before moving on. Since routes only ever
//! grow at the end during search, the end state of a feasible route is kept
//! in a [`RouteState`] and extended one stop at a time.

use crate::models::{Problem, DEPOT};

/// End state of a feasible route: where the vehicle is, what it has
/// delivered, and when it is free to leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteState {
    /// Last visited location (the depot for an empty route).
    pub last: usize,
    /// Cumulative demand delivered so far.
    pub load: i32,
    /// Departure time from `last`.
    pub clock: f64,
}

impl RouteState {
    /// State of an empty route: at the depot, empty, time zero.
    pub fn start() -> Self {
        Self {
            last: DEPOT,
            load: 0,
            clock: 0.0,
        }
    }
}

impl Default for RouteState {
    fn default() -> Self {
        Self::start()
    }
}

/// Checks whether customers can be appended to routes of a problem's fleet.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::{Customer, Problem, TimeWindow};
/// use vrptw_csp::evaluation::FeasibilityChecker;
///
/// let problem = Problem::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 10, 5.0)
///             .with_time_window(TimeWindow::new(0.0, 100.0).unwrap()),
///         Customer::new(2, 6.0, 8.0, 20, 5.0)
///             .with_time_window(TimeWindow::new(0.0, 12.0).unwrap()),
///     ],
///     100,
///     1,
/// );
/// let checker = FeasibilityChecker::new(&problem);
/// // 1 then 2: reach customer 2 at 5 + 5 + 5 = 15 > 12
/// assert!(!checker.is_feasible(2, &[1], &[vec![1]]));
/// assert!(checker.is_feasible(2, &[], &[vec![1], vec![]]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityChecker<'a> {
    problem: &'a Problem,
}

impl<'a> FeasibilityChecker<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    /// Appends `customer` to a route ending in `state`.
    ///
    /// Returns the new end state, or `None` if capacity would be exceeded
    /// (including a load past `i32::MAX`) or service at `customer` could not
    /// begin by its due time.
    pub fn extend(&self, state: &RouteState, customer: usize) -> Option<RouteState> {
        let record = self.problem.customer(customer);
        let load = state.load.checked_add(record.demand())?;
        if load > self.problem.capacity() {
            return None;
        }
        let arrival = state.clock + self.problem.distance(state.last, customer);
        let start = record.try_serve(arrival)?;
        Some(RouteState {
            last: customer,
            load,
            clock: start + record.service_duration(),
        })
    }

    /// Simulates a whole route, returning its end state if it is feasible.
    pub fn simulate(&self, route: &[usize]) -> Option<RouteState> {
        route
            .iter()
            .try_fold(RouteState::start(), |state, &c| self.extend(&state, c))
    }

    /// Capacity check for `route` followed by `candidate`.
    ///
    /// This and the two checks below re-simulate from scratch; the search
    /// only uses [`extend`](Self::extend) through `RouteTable::can_place`, and
    /// tests use these as the reference it must agree with.
    pub fn fits_capacity(&self, route: &[usize], candidate: usize) -> bool {
        let load: i64 = route
            .iter()
            .chain(std::iter::once(&candidate))
            .map(|&c| i64::from(self.problem.customer(c).demand()))
            .sum();
        load <= i64::from(self.problem.capacity())
    }

    /// Time-window check for `route` in visiting order.
    pub fn fits_time_windows(&self, route: &[usize]) -> bool {
        let mut clock = 0.0;
        let mut prev = DEPOT;
        for &c in route {
            let record = self.problem.customer(c);
            let Some(start) = record.try_serve(clock + self.problem.distance(prev, c)) else {
                return false;
            };
            clock = start + record.service_duration();
            prev = c;
        }
        true
    }

    /// Full check for placing `candidate` at the end of `route`.
    ///
    /// `routes` is the current route of every vehicle: the candidate must not
    /// be served by any of them already. Agrees with `RouteTable::can_place`
    /// on every input.
    pub fn is_feasible(&self, candidate: usize, route: &[usize], routes: &[Vec<usize>]) -> bool {
        if routes.iter().any(|r| r.contains(&candidate)) {
            return false;
        }
        if !self.fits_capacity(route, candidate) {
            return false;
        }
        let mut extended = route.to_vec();
        extended.push(candidate);
        self.fits_time_windows(&extended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, TimeWindow};

    fn tw(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    /// Customers on the x axis at 1, 2, 3 with unit service.
    fn line_problem(capacity: i32) -> Problem {
        Problem::new(
            vec![
                Customer::depot(0.0, 0.0).with_time_window(tw(0.0, 1000.0)),
                Customer::new(1, 1.0, 0.0, 10, 1.0).with_time_window(tw(0.0, 100.0)),
                Customer::new(2, 2.0, 0.0, 10, 1.0).with_time_window(tw(10.0, 12.0)),
                Customer::new(3, 3.0, 0.0, 10, 1.0).with_time_window(tw(0.0, 4.0)),
            ],
            capacity,
            3,
        )
    }

    #[test]
    fn test_empty_route_is_feasible() {
        let problem = line_problem(100);
        let checker = FeasibilityChecker::new(&problem);
        assert!(checker.fits_time_windows(&[]));
        assert_eq!(checker.simulate(&[]), Some(RouteState::start()));
    }

    #[test]
    fn test_waiting_is_free() {
        let problem = line_problem(100);
        let checker = FeasibilityChecker::new(&problem);
        // arrive at 2 at t=2, wait until 10, serve until 11
        let state = checker.simulate(&[2]).expect("feasible");
        assert_eq!(state.clock, 11.0);
        assert_eq!(state.load, 10);
        assert_eq!(state.last, 2);
    }

    #[test]
    fn test_late_arrival_rejected() {
        let problem = line_problem(100);
        let checker = FeasibilityChecker::new(&problem);
        // 1 (t=1..2), 2 (t=3, wait to 10, leave 11), 3 arrives at 12 > 4
        assert!(!checker.fits_time_windows(&[1, 2, 3]));
        assert!(checker.simulate(&[1, 2, 3]).is_none());
        // 1 then 3: arrive 4, exactly on due
        assert!(checker.fits_time_windows(&[1, 3]));
    }

    #[test]
    fn test_capacity() {
        let problem = line_problem(25);
        let checker = FeasibilityChecker::new(&problem);
        assert!(checker.fits_capacity(&[1], 3));
        assert!(!checker.fits_capacity(&[1, 3], 2));
        assert!(checker.simulate(&[1, 3]).is_some());
        assert!(checker.simulate(&[1, 3, 2]).is_none());
    }

    #[test]
    fn test_load_past_i32_max_is_infeasible() {
        let problem = Problem::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 2_000_000_000, 0.0),
                Customer::new(2, 2.0, 0.0, 2_000_000_000, 0.0),
            ],
            i32::MAX,
            2,
        );
        let checker = FeasibilityChecker::new(&problem);
        let state = checker.simulate(&[1]).expect("one fits");
        assert_eq!(checker.extend(&state, 2), None);
        assert!(checker.simulate(&[1, 2]).is_none());
        assert!(!checker.fits_capacity(&[1], 2));
        assert!(!checker.is_feasible(2, &[1], &[vec![1], vec![]]));
    }

    #[test]
    fn test_global_uniqueness() {
        let problem = line_problem(100);
        let checker = FeasibilityChecker::new(&problem);
        let routes = vec![vec![1], vec![]];
        assert!(!checker.is_feasible(1, &[], &routes));
        assert!(checker.is_feasible(3, &[], &routes));
        assert!(checker.is_feasible(3, &[1], &routes));
    }

    #[test]
    fn test_extend_matches_simulation() {
        let problem = line_problem(100);
        let checker = FeasibilityChecker::new(&problem);
        let routes: [&[usize]; 5] = [&[1], &[1, 2], &[1, 3], &[2, 1], &[3, 2]];
        for route in routes {
            for candidate in 1..=3 {
                if route.contains(&candidate) {
                    continue;
                }
                let mut full = route.to_vec();
                full.push(candidate);
                let incremental = checker
                    .simulate(route)
                    .and_then(|s| checker.extend(&s, candidate));
                assert_eq!(incremental, checker.simulate(&full));
                assert_eq!(
                    incremental.is_some(),
                    checker.is_feasible(candidate, route, &[route.to_vec()])
                );
            }
        }
    }
}
