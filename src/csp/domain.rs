//! Per-customer candidate vehicle sets with trail-based restore.

use std::ops::Range;

/// Position in the removal trail, used to undo pruning on backtrack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainCheckpoint(usize);

/// Candidate vehicles of every variable (customer).
///
/// Domains start as `0..vehicle_limit` and only shrink through
/// [`remove`](Self::remove). Every removal is recorded on a trail so that
/// [`restore`](Self::restore) puts back exactly the values removed since a
/// checkpoint. Values are always iterated in ascending order.
///
/// # Examples
///
/// ```
/// use vrptw_csp::csp::DomainStore;
///
/// let mut domains = DomainStore::new(1..4, 3);
/// let mark = domains.checkpoint();
/// domains.remove(2, 1);
/// assert_eq!(domains.values(2).collect::<Vec<_>>(), vec![0, 2]);
/// domains.restore(mark);
/// assert_eq!(domains.size(2), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DomainStore {
    members: Vec<Vec<bool>>,
    sizes: Vec<usize>,
    trail: Vec<(usize, usize)>,
    vehicle_limit: usize,
}

impl DomainStore {
    /// Gives every variable in `variables` the full domain `0..vehicle_limit`.
    pub fn new(variables: Range<usize>, vehicle_limit: usize) -> Self {
        let len = variables.end;
        let mut members = vec![Vec::new(); len];
        let mut sizes = vec![0; len];
        for var in variables {
            members[var] = vec![true; vehicle_limit];
            sizes[var] = vehicle_limit;
        }
        Self {
            members,
            sizes,
            trail: Vec::new(),
            vehicle_limit,
        }
    }

    /// Number of vehicles every domain started from.
    pub fn vehicle_limit(&self) -> usize {
        self.vehicle_limit
    }

    /// Current number of candidate vehicles of `var`.
    pub fn size(&self, var: usize) -> usize {
        self.sizes[var]
    }

    pub fn is_empty(&self, var: usize) -> bool {
        self.sizes[var] == 0
    }

    pub fn contains(&self, var: usize, value: usize) -> bool {
        self.members[var].get(value).copied().unwrap_or(false)
    }

    /// Candidate vehicles of `var` in ascending order.
    pub fn values(&self, var: usize) -> impl Iterator<Item = usize> + '_ {
        self.members[var]
            .iter()
            .enumerate()
            .filter_map(|(value, &present)| present.then_some(value))
    }

    /// Removes `value` from the domain of `var`.
    ///
    /// Returns `false` if the value was not in the domain.
    pub fn remove(&mut self, var: usize, value: usize) -> bool {
        if !self.contains(var, value) {
            return false;
        }
        self.members[var][value] = false;
        self.sizes[var] -= 1;
        self.trail.push((var, value));
        true
    }

    pub fn checkpoint(&self) -> DomainCheckpoint {
        DomainCheckpoint(self.trail.len())
    }

    /// Puts back every value removed since `checkpoint`.
    ///
    /// # Panics
    ///
    /// Panics if the trail is already shorter than the checkpoint, which
    /// means checkpoints were restored out of order.
    pub fn restore(&mut self, checkpoint: DomainCheckpoint) {
        assert!(
            checkpoint.0 <= self.trail.len(),
            "domain checkpoint restored out of order"
        );
        for (var, value) in self.trail.drain(checkpoint.0..).rev() {
            self.members[var][value] = true;
            self.sizes[var] += 1;
        }
    }
}
