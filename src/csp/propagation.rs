//! Domain pruning: forward checking after each commitment and an arc
//! consistency sweep before search.

use std::collections::VecDeque;

use tracing::trace;

use super::{DomainStore, RouteTable};
use crate::evaluation::FeasibilityChecker;

/// Prunes the domain of every unassigned customer to the vehicles whose
/// current route can still take it at the end.
///
/// Returns `false` as soon as a domain becomes empty; in that case every
/// removal made by this call has already been undone.
pub fn forward_check(
    checker: &FeasibilityChecker<'_>,
    domains: &mut DomainStore,
    routes: &RouteTable,
) -> bool {
    let checkpoint = domains.checkpoint();
    for var in checker.problem().customer_indices() {
        if routes.is_assigned(var) {
            continue;
        }
        let candidates: Vec<usize> = domains.values(var).collect();
        for vehicle in candidates {
            if routes.can_place(checker, var, vehicle).is_none() {
                domains.remove(var, vehicle);
            }
        }
        if domains.is_empty(var) {
            trace!(customer = var, "forward checking wiped out a domain");
            domains.restore(checkpoint);
            return false;
        }
    }
    true
}

/// Runs the pairwise consistency sweep over all unassigned customers.
///
/// A vehicle is kept in the domain of `x` while some vehicle in the domain of
/// `y` can take `x` onto its current route. Before search every route is
/// empty, so this only discards customers that no vehicle can serve on its
/// own; it is a cheap pruning pass, not a proof that a solution exists.
///
/// Returns `false` if some domain becomes empty.
pub fn arc_consistency(
    checker: &FeasibilityChecker<'_>,
    domains: &mut DomainStore,
    routes: &RouteTable,
) -> bool {
    let variables: Vec<usize> = checker
        .problem()
        .customer_indices()
        .filter(|&v| !routes.is_assigned(v))
        .collect();

    let mut queue: VecDeque<(usize, usize)> = variables
        .iter()
        .flat_map(|&x| variables.iter().filter(move |&&y| y != x).map(move |&y| (x, y)))
        .collect();

    while let Some((x, y)) = queue.pop_front() {
        if revise(checker, domains, routes, x, y) {
            if domains.is_empty(x) {
                trace!(customer = x, "arc consistency emptied a domain");
                return false;
            }
            queue.extend(
                variables
                    .iter()
                    .filter(|&&z| z != x && z != y)
                    .map(|&z| (z, x)),
            );
        }
    }
    true
}

/// Removes the values of `x` without support in the domain of `y`.
fn revise(
    checker: &FeasibilityChecker<'_>,
    domains: &mut DomainStore,
    routes: &RouteTable,
    x: usize,
    y: usize,
) -> bool {
    let candidates: Vec<usize> = domains.values(x).collect();
    let mut revised = false;
    for value in candidates {
        let supported = domains
            .values(y)
            .any(|w| routes.can_place(checker, x, w).is_some());
        if !supported {
            domains.remove(x, value);
            revised = true;
        }
    }
    revised
}
