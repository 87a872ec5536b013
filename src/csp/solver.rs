//! Vehicle-count minimization around the backtracking search.

use tracing::{debug, info};

use super::{propagation, Backtracking, DomainStore, RouteTable};
use crate::config::SolverConfig;
use crate::evaluation::{FeasibilityChecker, RouteEvaluator};
use crate::models::{Problem, SearchStats, Solution};

/// Solves `problem` with the default configuration.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::{Customer, Problem};
///
/// let problem = Problem::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 1.0, 0.0, 10, 0.0),
///         Customer::new(2, -1.0, 0.0, 10, 0.0),
///     ],
///     15,
///     2,
/// );
/// let solution = vrptw_csp::solve(&problem).unwrap();
/// assert_eq!(solution.num_vehicles(), 2);
/// assert!((solution.total_distance() - 4.0).abs() < 1e-10);
/// ```
pub fn solve(problem: &Problem) -> Option<Solution> {
    CspSolver::new(problem).solve()
}

/// Finds a feasible solution with as few vehicles as the search allows.
///
/// Vehicle caps `k = 1, 2, …` up to the fleet size are tried in turn. For
/// each cap every customer may use vehicles `0..k`; arc consistency screens
/// the cap, then backtracking looks for a complete assignment. The first
/// solution found is returned: its vehicle count is minimal among the caps
/// tried, but its distance is whatever the search order produced.
pub struct CspSolver<'a> {
    problem: &'a Problem,
    config: SolverConfig,
}

impl<'a> CspSolver<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Largest vehicle cap this solver will try.
    pub fn vehicle_cap(&self) -> usize {
        let fleet = self.problem.fleet_size();
        self.config.max_vehicles.map_or(fleet, |m| m.min(fleet))
    }

    /// Runs the minimization loop.
    ///
    /// Returns `None` when no cap up to [`vehicle_cap`](Self::vehicle_cap)
    /// yields a solution.
    pub fn solve(&self) -> Option<Solution> {
        let mut stats = SearchStats::default();
        for k in 1..=self.vehicle_cap() {
            debug!(vehicles = k, "trying vehicle cap");
            if let Some(routes) = self.attempt(k, &mut stats) {
                let solution = self.build_solution(&routes, k, stats);
                info!(
                    vehicles = solution.num_vehicles(),
                    distance = solution.total_distance(),
                    nodes = stats.nodes,
                    "solution found"
                );
                return Some(solution);
            }
        }
        info!(
            customers = self.problem.num_customers(),
            fleet = self.problem.fleet_size(),
            nodes = stats.nodes,
            "no solution found"
        );
        None
    }

    fn attempt(&self, k: usize, stats: &mut SearchStats) -> Option<RouteTable> {
        stats.attempts += 1;
        let checker = FeasibilityChecker::new(self.problem);
        let mut domains = DomainStore::new(self.problem.customer_indices(), k);
        let mut routes = RouteTable::new(self.problem.customers().len(), k);

        if self.config.arc_consistency
            && !propagation::arc_consistency(&checker, &mut domains, &routes)
        {
            stats.arc_inconsistent += 1;
            debug!(vehicles = k, "arc consistency failed");
            return None;
        }

        let mut search =
            Backtracking::new(checker).with_forward_checking(self.config.forward_checking);
        let found = search.run(&mut domains, &mut routes);
        stats.absorb(search.stats());
        debug!(
            vehicles = k,
            found,
            nodes = search.stats().nodes,
            backtracks = search.stats().backtracks,
            "search finished"
        );
        found.then_some(routes)
    }

    fn build_solution(&self, routes: &RouteTable, k: usize, stats: SearchStats) -> Solution {
        let evaluator = RouteEvaluator::new(self.problem);
        let timed = (0..routes.num_vehicles())
            .map(|vehicle| {
                let (route, violations) = evaluator.build_route(vehicle, routes.route(vehicle));
                debug_assert!(violations.is_empty(), "search produced {violations:?}");
                route
            })
            .collect();
        Solution::new(timed, k, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, TimeWindow};
    use proptest::prelude::*;

    fn tw(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    fn two_customers(capacity: i32) -> Problem {
        Problem::new(
            vec![
                Customer::depot(0.0, 0.0).with_time_window(tw(0.0, 1000.0)),
                Customer::new(1, 1.0, 0.0, 10, 0.0).with_time_window(tw(0.0, 1000.0)),
                Customer::new(2, 0.0, 1.0, 10, 0.0).with_time_window(tw(0.0, 1000.0)),
            ],
            capacity,
            2,
        )
    }

    #[test]
    fn test_single_vehicle_scenario() {
        let problem = two_customers(100);
        let solution = solve(&problem).expect("feasible");
        assert_eq!(solution.num_vehicles(), 1);
        assert_eq!(solution.vehicle_limit(), 1);
        let route = solution.routes()[0].customers();
        assert!(route == vec![1, 2] || route == vec![2, 1]);
        let expected = 1.0 + 2f64.sqrt() + 1.0;
        assert!((solution.total_distance() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_capacity_forces_two_vehicles() {
        let problem = two_customers(15);
        let solution = solve(&problem).expect("feasible");
        assert_eq!(solution.num_vehicles(), 2);
        assert_eq!(solution.vehicle_limit(), 2);
        for route in solution.routes() {
            assert_eq!(route.len(), 1);
        }
        assert!((solution.total_distance() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_unreachable_customer_has_no_solution() {
        let problem = Problem::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 10, 0.0),
                Customer::new(2, 30.0, 40.0, 10, 0.0).with_time_window(tw(0.0, 49.0)),
            ],
            100,
            3,
        );
        assert!(solve(&problem).is_none());
        let without_ac = CspSolver::new(&problem)
            .with_config(SolverConfig::default().with_arc_consistency(false))
            .solve();
        assert!(without_ac.is_none());
    }

    #[test]
    fn test_max_vehicles_caps_the_loop() {
        let problem = two_customers(15);
        let solver = CspSolver::new(&problem).with_config(SolverConfig::default().with_max_vehicles(1));
        assert_eq!(solver.vehicle_cap(), 1);
        assert!(solver.solve().is_none());

        let solver = CspSolver::new(&problem).with_config(SolverConfig::default().with_max_vehicles(9));
        assert_eq!(solver.vehicle_cap(), 2);
    }

    #[test]
    fn test_stats_count_every_cap() {
        let problem = two_customers(15);
        let solution = solve(&problem).expect("feasible");
        assert_eq!(solution.stats().attempts, 2);
        assert!(solution.stats().nodes >= 3);
    }

    #[test]
    fn test_depot_only_instance() {
        let problem = Problem::new(vec![Customer::depot(0.0, 0.0)], 10, 1);
        let solution = solve(&problem).expect("nothing to serve");
        assert_eq!(solution.num_vehicles(), 0);
        assert_eq!(solution.total_distance(), 0.0);
    }

    #[test]
    fn test_huge_demands_split_instead_of_overflowing() {
        let problem = Problem::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 2_000_000_000, 0.0),
                Customer::new(2, 0.0, 1.0, 2_000_000_000, 0.0),
            ],
            i32::MAX,
            2,
        );
        let solution = solve(&problem).expect("one customer per vehicle");
        assert_eq!(solution.num_vehicles(), 2);
        assert!(RouteEvaluator::new(&problem).evaluate_solution(&solution).is_empty());

        let single = Problem::new(problem.customers().to_vec(), i32::MAX, 1);
        assert!(solve(&single).is_none());
    }

    #[test]
    fn test_empty_fleet() {
        let problem = Problem::new(two_customers(100).customers().to_vec(), 100, 0);
        assert!(solve(&problem).is_none());
    }

    #[test]
    fn test_reported_schedule_respects_windows() {
        let problem = Problem::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 10, 2.0).with_time_window(tw(5.0, 8.0)),
                Customer::new(2, 2.0, 0.0, 10, 2.0).with_time_window(tw(0.0, 20.0)),
            ],
            100,
            2,
        );
        let solution = solve(&problem).expect("feasible");
        assert_eq!(solution.num_vehicles(), 1);
        let visits = solution.routes()[0].visits();
        assert_eq!(visits[0].customer, 1);
        assert_eq!(visits[0].arrival_time, 1.0);
        assert_eq!(visits[0].service_start, 5.0);
        assert_eq!(visits[1].arrival_time, 8.0);
    }

    fn instance_strategy() -> impl Strategy<Value = Problem> {
        let customer = (
            0.0..20.0f64,
            0.0..20.0f64,
            1..15i32,
            0.0..40.0f64,
            0.0..60.0f64,
            0.0..3.0f64,
        );
        (prop::collection::vec(customer, 1..6), 15..40i32, 1..4usize).prop_map(
            |(records, capacity, fleet)| {
                let mut customers = vec![Customer::depot(10.0, 10.0)];
                for (i, (x, y, demand, ready, width, service)) in records.into_iter().enumerate() {
                    let window = TimeWindow::new(ready, ready + width).expect("ordered");
                    customers.push(
                        Customer::new(i + 1, x, y, demand, service).with_time_window(window),
                    );
                }
                Problem::new(customers, capacity, fleet)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_solutions_are_valid(problem in instance_strategy()) {
            if let Some(solution) = solve(&problem) {
                let violations = RouteEvaluator::new(&problem).evaluate_solution(&solution);
                prop_assert!(violations.is_empty(), "{:?}", violations);
                prop_assert_eq!(solution.num_served(), problem.num_customers());
                prop_assert!(solution.num_vehicles() <= solution.vehicle_limit());
                for route in solution.routes() {
                    prop_assert!(route.total_load() <= problem.capacity());
                    prop_assert!(route.vehicle() < solution.vehicle_limit());
                }
            }
        }

        #[test]
        fn prop_distance_matches_matrix(problem in instance_strategy()) {
            if let Some(solution) = solve(&problem) {
                let expected: f64 = solution
                    .routes()
                    .iter()
                    .map(|r| problem.distances().tour_length(0, &r.customers()))
                    .sum();
                prop_assert!((solution.total_distance() - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_solve_is_deterministic(problem in instance_strategy()) {
            let first = solve(&problem);
            let second = solve(&problem);
            prop_assert_eq!(first.is_some(), second.is_some());
            if let (Some(a), Some(b)) = (first, second) {
                let ra: Vec<_> = a.routes().iter().map(|r| (r.vehicle(), r.customers())).collect();
                let rb: Vec<_> = b.routes().iter().map(|r| (r.vehicle(), r.customers())).collect();
                prop_assert_eq!(ra, rb);
            }
        }

        #[test]
        fn prop_smaller_caps_fail(problem in instance_strategy()) {
            if let Some(solution) = solve(&problem) {
                let k = solution.vehicle_limit();
                if k > 1 {
                    let capped = CspSolver::new(&problem)
                        .with_config(SolverConfig::default().with_max_vehicles(k - 1))
                        .solve();
                    prop_assert!(capped.is_none());
                }
            }
        }

        #[test]
        fn prop_unpruned_search_is_valid(problem in instance_strategy()) {
            let plain = CspSolver::new(&problem)
                .with_config(
                    SolverConfig::default()
                        .with_arc_consistency(false)
                        .with_forward_checking(false),
                )
                .solve();
            if let Some(solution) = plain {
                let violations = RouteEvaluator::new(&problem).evaluate_solution(&solution);
                prop_assert!(violations.is_empty(), "{:?}", violations);
            }
        }
    }
}
