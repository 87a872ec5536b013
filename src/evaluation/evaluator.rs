//! Route evaluator that computes timing, load, and violations.

use crate::models::{Problem, Route, Solution, Violation, Visit, DEPOT};

/// Builds timed routes and verifies complete solutions.
///
/// Unlike [`FeasibilityChecker`](super::FeasibilityChecker), which stops at
/// the first problem, the evaluator simulates the whole route and reports
/// every violation it finds.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::{Customer, Problem};
/// use vrptw_csp::evaluation::RouteEvaluator;
///
/// let problem = Problem::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 10, 5.0),
///         Customer::new(2, 6.0, 8.0, 20, 5.0),
///     ],
///     100,
///     1,
/// );
/// let evaluator = RouteEvaluator::new(&problem);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert!(violations.is_empty());
/// assert!((route.total_distance() - 20.0).abs() < 1e-10);
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a Problem,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Simulates `customers` in order for `vehicle`.
    ///
    /// Returns the timed route and any capacity or time-window violations.
    pub fn build_route(&self, vehicle: usize, customers: &[usize]) -> (Route, Vec<Violation>) {
        let mut route = Route::new(vehicle);
        let mut violations = Vec::new();
        let mut clock = 0.0;
        let mut load: i32 = 0;
        let mut total: i64 = 0;
        let mut prev = DEPOT;

        for &c in customers {
            let record = self.problem.customer(c);
            let arrival = clock + self.problem.distance(prev, c);
            let service_start = match record.time_window() {
                Some(tw) => {
                    let start = tw.service_start(arrival);
                    if tw.is_violated(start) {
                        violations.push(Violation::TimeWindowViolated {
                            customer: c,
                            service_start: start,
                            due: tw.due(),
                        });
                    }
                    start
                }
                None => arrival,
            };
            let departure = service_start + record.service_duration();
            total += i64::from(record.demand());
            load = load.saturating_add(record.demand());

            route.push_visit(Visit {
                customer: c,
                arrival_time: arrival,
                service_start,
                departure_time: departure,
                load_after: load,
            });

            clock = departure;
            prev = c;
        }

        if total > i64::from(self.problem.capacity()) {
            violations.push(Violation::CapacityExceeded {
                vehicle,
                load,
                capacity: self.problem.capacity(),
            });
        }

        let distance = self.problem.distances().tour_length(DEPOT, customers);
        let duration = if customers.is_empty() {
            0.0
        } else {
            clock + self.problem.distance(prev, DEPOT)
        };
        route.set_totals(distance, duration);

        (route, violations)
    }

    /// Checks every route of `solution` and that each customer is served
    /// exactly once.
    pub fn evaluate_solution(&self, solution: &Solution) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut served = vec![false; self.problem.customers().len()];

        for route in solution.routes() {
            let customers = route.customers();
            for &c in &customers {
                match served.get_mut(c) {
                    Some(_) if c == DEPOT => {
                        violations.push(Violation::UnknownCustomer { customer: c })
                    }
                    Some(flag) if *flag => {
                        violations.push(Violation::DuplicateCustomer { customer: c })
                    }
                    Some(flag) => *flag = true,
                    None => violations.push(Violation::UnknownCustomer { customer: c }),
                }
            }
            if customers.iter().all(|&c| c != DEPOT && c < served.len()) {
                let (_, mut route_violations) = self.build_route(route.vehicle(), &customers);
                violations.append(&mut route_violations);
            }
        }

        violations.extend(
            self.problem
                .customer_indices()
                .filter(|&c| !served[c])
                .map(|customer| Violation::MissingCustomer { customer }),
        );
        violations
    }
}
