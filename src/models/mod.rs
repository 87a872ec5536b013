//! Domain model types for the VRPTW.
//!
//! Customers with demands and time windows, the problem instance tying them
//! to a homogeneous fleet, timed routes, and solutions.

mod customer;
mod problem;
mod route;
mod solution;

pub use customer::{Customer, TimeWindow};
pub use problem::{Problem, DEPOT};
pub use route::{Route, Visit};
pub use solution::{SearchStats, Solution, Violation};
