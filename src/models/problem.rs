//! VRPTW problem instance.

use super::Customer;
use crate::distance::DistanceMatrix;

/// Index of the depot within [`Problem::customers`].
pub const DEPOT: usize = 0;

/// A VRPTW instance: customers, a homogeneous fleet, and the distance matrix.
///
/// Record 0 of `customers` is the depot; records `1..N` are the customers to
/// serve. The distance matrix is computed once on construction and shared by
/// the search and the reported solution.
///
/// # Examples
///
/// ```
/// use vrptw_csp::models::{Customer, Problem};
///
/// let problem = Problem::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 10, 0.0),
///     ],
///     100,
///     2,
/// );
/// assert_eq!(problem.num_customers(), 1);
/// assert!((problem.distance(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    customers: Vec<Customer>,
    capacity: i32,
    fleet_size: usize,
    distances: DistanceMatrix,
}

impl Problem {
    /// Creates an instance and precomputes its distance matrix.
    pub fn new(customers: Vec<Customer>, capacity: i32, fleet_size: usize) -> Self {
        let distances = DistanceMatrix::from_customers(&customers);
        Self {
            customers,
            capacity,
            fleet_size,
            distances,
        }
    }

    /// All records, depot first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Record at `index`.
    pub fn customer(&self, index: usize) -> &Customer {
        &self.customers[index]
    }

    /// Number of customers to serve (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len().saturating_sub(1)
    }

    /// Indices of the customers to serve, in natural order.
    pub fn customer_indices(&self) -> std::ops::Range<usize> {
        1..self.customers.len().max(1)
    }

    /// Capacity shared by every vehicle of the fleet.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Number of available vehicles.
    pub fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance (and time) between two records.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }
}
