//! Vehicle routes and the customer assignment built during search.

use crate::evaluation::{FeasibilityChecker, RouteState};

/// Position in the commitment trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteCheckpoint(usize);

/// Routes of every vehicle under the current cap, together with the
/// assignment of customers to vehicles.
///
/// Customers are only ever appended at the end of a route. Each route keeps
/// the [`RouteState`] of its last stop so feasibility of the next append is
/// checked without re-simulating the route. Commitments are recorded on a
/// trail and undone in reverse order by [`restore`](Self::restore).
///
/// # Examples
///
/// ```
/// use vrptw_csp::csp::RouteTable;
/// use vrptw_csp::evaluation::FeasibilityChecker;
/// use vrptw_csp::models::{Customer, Problem};
///
/// let problem = Problem::new(
///     vec![Customer::depot(0.0, 0.0), Customer::new(1, 1.0, 0.0, 5, 0.0)],
///     10,
///     2,
/// );
/// let checker = FeasibilityChecker::new(&problem);
/// let mut table = RouteTable::new(problem.customers().len(), 2);
///
/// let mark = table.checkpoint();
/// let state = table.can_place(&checker, 1, 1).unwrap();
/// table.commit(1, 1, state);
/// assert_eq!(table.vehicle_of(1), Some(1));
/// assert!(table.can_place(&checker, 1, 0).is_none());
///
/// table.restore(mark);
/// assert_eq!(table.num_assigned(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Vec<usize>>,
    states: Vec<RouteState>,
    assignment: Vec<Option<usize>>,
    assigned: usize,
    trail: Vec<(usize, RouteState)>,
}

impl RouteTable {
    /// Creates `num_vehicles` empty routes for an instance with
    /// `num_locations` records (depot included).
    pub fn new(num_locations: usize, num_vehicles: usize) -> Self {
        Self {
            routes: vec![Vec::new(); num_vehicles],
            states: vec![RouteState::start(); num_vehicles],
            assignment: vec![None; num_locations],
            assigned: 0,
            trail: Vec::new(),
        }
    }

    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Customers of `vehicle` in visiting order.
    pub fn route(&self, vehicle: usize) -> &[usize] {
        &self.routes[vehicle]
    }

    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// End state of the route of `vehicle`.
    pub fn state(&self, vehicle: usize) -> &RouteState {
        &self.states[vehicle]
    }

    /// Vehicle `customer` is committed to, if any.
    pub fn vehicle_of(&self, customer: usize) -> Option<usize> {
        self.assignment[customer]
    }

    pub fn is_assigned(&self, customer: usize) -> bool {
        self.assignment[customer].is_some()
    }

    /// Size of the assignment.
    pub fn num_assigned(&self) -> usize {
        self.assigned
    }

    /// Checks appending `customer` to the route of `vehicle`.
    ///
    /// Fails if the customer is already served by any route, or if capacity
    /// or time windows would be violated. On success returns the end state
    /// the route would have.
    pub fn can_place(
        &self,
        checker: &FeasibilityChecker<'_>,
        customer: usize,
        vehicle: usize,
    ) -> Option<RouteState> {
        if self.is_assigned(customer) {
            return None;
        }
        checker.extend(&self.states[vehicle], customer)
    }

    /// Appends `customer` to `vehicle`'s route with the end state computed
    /// by [`can_place`](Self::can_place).
    pub fn commit(&mut self, customer: usize, vehicle: usize, state: RouteState) {
        debug_assert!(!self.is_assigned(customer), "customer {customer} committed twice");
        self.trail.push((vehicle, self.states[vehicle]));
        self.routes[vehicle].push(customer);
        self.states[vehicle] = state;
        self.assignment[customer] = Some(vehicle);
        self.assigned += 1;
    }

    pub fn checkpoint(&self) -> RouteCheckpoint {
        RouteCheckpoint(self.trail.len())
    }

    /// Undoes every commitment made since `checkpoint`.
    ///
    /// # Panics
    ///
    /// Panics if checkpoints are restored out of order.
    pub fn restore(&mut self, checkpoint: RouteCheckpoint) {
        assert!(
            checkpoint.0 <= self.trail.len(),
            "route checkpoint restored out of order"
        );
        while self.trail.len() > checkpoint.0 {
            let Some((vehicle, previous)) = self.trail.pop() else {
                break;
            };
            if let Some(customer) = self.routes[vehicle].pop() {
                self.assignment[customer] = None;
                self.assigned -= 1;
            }
            self.states[vehicle] = previous;
        }
    }
}
