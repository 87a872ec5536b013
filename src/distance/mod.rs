//! Distance and travel time matrix.
//!
//! Distances double as travel times: vehicles move at unit speed.

mod matrix;

pub use matrix::DistanceMatrix;
