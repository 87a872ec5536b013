//! Depth-first backtracking over customer-to-vehicle assignments.
//!
//! # Algorithm
//!
//! At each node the unassigned customer with the fewest candidate vehicles
//! is chosen (minimum remaining values). Its candidates are tried in order of
//! how many other unassigned customers still list them (least constraining
//! value). A candidate is committed by appending the customer to the end of
//! the vehicle's route, after which forward checking prunes the remaining
//! domains. Failure anywhere below undoes the commitment and the pruning
//! before the next candidate is tried. Ties in both orderings go to the
//! smaller index, so the search is fully deterministic.

use tracing::trace;

use super::{propagation, DomainStore, RouteTable};
use crate::evaluation::FeasibilityChecker;
use crate::models::SearchStats;

/// Backtracking search with MRV/LCV ordering and optional forward checking.
pub struct Backtracking<'a> {
    checker: FeasibilityChecker<'a>,
    forward_checking: bool,
    stats: SearchStats,
}

impl<'a> Backtracking<'a> {
    pub fn new(checker: FeasibilityChecker<'a>) -> Self {
        Self {
            checker,
            forward_checking: true,
            stats: SearchStats::default(),
        }
    }

    /// Enables or disables forward checking after each commitment.
    pub fn with_forward_checking(mut self, enabled: bool) -> Self {
        self.forward_checking = enabled;
        self
    }

    /// Counters of the searches run so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Searches for a complete assignment.
    ///
    /// On success returns `true` and leaves the solution in `routes`. On
    /// failure `routes` and `domains` are back in the state they were given.
    pub fn run(&mut self, domains: &mut DomainStore, routes: &mut RouteTable) -> bool {
        self.backtrack(domains, routes)
    }

    fn backtrack(&mut self, domains: &mut DomainStore, routes: &mut RouteTable) -> bool {
        self.stats.nodes += 1;
        let Some(var) = self.select_variable(domains, routes) else {
            return true;
        };
        trace!(
            customer = var,
            candidates = domains.size(var),
            depth = routes.num_assigned(),
            "branching"
        );

        for vehicle in self.order_values(var, domains, routes) {
            let Some(state) = routes.can_place(&self.checker, var, vehicle) else {
                continue;
            };
            let route_mark = routes.checkpoint();
            let domain_mark = domains.checkpoint();
            routes.commit(var, vehicle, state);

            if !self.forward_checking || propagation::forward_check(&self.checker, domains, routes) {
                if self.backtrack(domains, routes) {
                    return true;
                }
            } else {
                self.stats.wipeouts += 1;
            }

            routes.restore(route_mark);
            domains.restore(domain_mark);
            self.stats.backtracks += 1;
        }
        false
    }

    /// Unassigned customer with the smallest domain, first one on ties.
    fn select_variable(&self, domains: &DomainStore, routes: &RouteTable) -> Option<usize> {
        self.checker
            .problem()
            .customer_indices()
            .filter(|&v| !routes.is_assigned(v))
            .min_by_key(|&v| domains.size(v))
    }

    /// Candidate vehicles of `var`, least constraining first.
    fn order_values(&self, var: usize, domains: &DomainStore, routes: &RouteTable) -> Vec<usize> {
        let others: Vec<usize> = self
            .checker
            .problem()
            .customer_indices()
            .filter(|&v| v != var && !routes.is_assigned(v))
            .collect();
        let mut values: Vec<(usize, usize)> = domains
            .values(var)
            .map(|vehicle| {
                let conflicts = others.iter().filter(|&&o| domains.contains(o, vehicle)).count();
                (conflicts, vehicle)
            })
            .collect();
        values.sort_by_key(|&(conflicts, _)| conflicts);
        values.into_iter().map(|(_, vehicle)| vehicle).collect()
    }
}
