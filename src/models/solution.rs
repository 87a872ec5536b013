//! Solution, search statistics, and violation types.

use super::Route;

/// A constraint violated by a route or a whole solution.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Route load above vehicle capacity.
    CapacityExceeded {
        vehicle: usize,
        load: i32,
        capacity: i32,
    },
    /// Service would begin after the customer's due time.
    TimeWindowViolated {
        customer: usize,
        service_start: f64,
        due: f64,
    },
    /// A customer appears in more than one stop.
    DuplicateCustomer { customer: usize },
    /// A customer is served by no route.
    MissingCustomer { customer: usize },
    /// A stop refers to the depot or to an index outside the instance.
    UnknownCustomer { customer: usize },
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Vehicle caps tried by the minimization loop.
    pub attempts: usize,
    /// Caps rejected by arc consistency before any search.
    pub arc_inconsistent: usize,
    /// Search nodes entered.
    pub nodes: u64,
    /// Tentative commitments that were undone.
    pub backtracks: u64,
    /// Forward-checking steps that emptied a domain.
    pub wipeouts: u64,
}

impl SearchStats {
    /// Adds the counters of `other` into `self`.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.attempts += other.attempts;
        self.arc_inconsistent += other.arc_inconsistent;
        self.nodes += other.nodes;
        self.backtracks += other.backtracks;
        self.wipeouts += other.wipeouts;
    }
}

/// A complete feasible assignment of customers to vehicles.
///
/// Only non-empty routes are kept; each remembers the index of its vehicle.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::{Route, SearchStats, Solution};
///
/// let sol = Solution::new(vec![Route::new(0)], 1, SearchStats::default());
/// assert_eq!(sol.num_vehicles(), 0);
/// assert_eq!(sol.total_distance(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    routes: Vec<Route>,
    vehicle_limit: usize,
    stats: SearchStats,
}

impl Solution {
    /// Creates a solution from per-vehicle routes, dropping empty ones.
    pub fn new(routes: Vec<Route>, vehicle_limit: usize, stats: SearchStats) -> Self {
        Self {
            routes: routes.into_iter().filter(|r| !r.is_empty()).collect(),
            vehicle_limit,
            stats,
        }
    }

    /// Non-empty routes ordered by vehicle index.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of vehicles actually used.
    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Vehicle cap at which the search succeeded.
    pub fn vehicle_limit(&self) -> usize {
        self.vehicle_limit
    }

    /// Sum of the route lengths.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(Route::total_distance).sum()
    }

    /// Number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Visit;

    fn route(vehicle: usize, customers: &[usize], distance: f64) -> Route {
        let mut r = Route::new(vehicle);
        for (i, &c) in customers.iter().enumerate() {
            r.push_visit(Visit {
                customer: c,
                arrival_time: 0.0,
                service_start: 0.0,
                departure_time: 0.0,
                load_after: (i as i32 + 1) * 10,
            });
        }
        r.set_totals(distance, 0.0);
        r
    }

    #[test]
    fn test_solution_drops_empty_routes() {
        let sol = Solution::new(
            vec![route(0, &[1], 50.0), Route::new(1), route(2, &[2, 3], 80.0)],
            3,
            SearchStats::default(),
        );
        assert_eq!(sol.num_vehicles(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.vehicle_limit(), 3);
        assert_eq!(sol.routes()[1].vehicle(), 2);
        assert!((sol.total_distance() - 130.0).abs() < 1e-10);
    }

    #[test]
    fn test_stats_absorb() {
        let mut total = SearchStats::default();
        let step = SearchStats {
            attempts: 1,
            arc_inconsistent: 0,
            nodes: 7,
            backtracks: 2,
            wipeouts: 1,
        };
        total.absorb(&step);
        total.absorb(&step);
        assert_eq!(total.attempts, 2);
        assert_eq!(total.nodes, 14);
        assert_eq!(total.wipeouts, 2);
    }
}
