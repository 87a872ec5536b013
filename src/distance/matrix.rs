//! Dense distance matrix.

use crate::models::Customer;

/// A dense n×n matrix of Euclidean distances stored in row-major order.
///
/// Travel time equals distance (unit speed), so the same matrix drives both
/// the time-window simulation and the reported route lengths.
///
/// # Examples
///
/// ```
/// use vrptw_csp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::build(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.get(2, 0) - 10.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix for an ordered list of points.
    pub fn build(locations: &[(f64, f64)]) -> Self {
        let size = locations.len();
        let mut data = vec![0.0; size * size];
        for (i, &(xi, yi)) in locations.iter().enumerate() {
            for (j, &(xj, yj)) in locations.iter().enumerate().skip(i + 1) {
                let d = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Computes the distance matrix from customer coordinates (index order).
    pub fn from_customers(customers: &[Customer]) -> Self {
        let locations: Vec<(f64, f64)> = customers.iter().map(Customer::location).collect();
        Self::build(&locations)
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == size * size).then_some(Self { data, size })
    }

    /// Distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the closed tour `depot → path… → depot`.
    ///
    /// An empty path has length zero.
    pub fn tour_length(&self, depot: usize, path: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
            return 0.0;
        };
        let inner: f64 = path.windows(2).map(|w| self.get(w[0], w[1])).sum();
        self.get(depot, first) + inner + self.get(last, depot)
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }
}
