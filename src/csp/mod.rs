//! Constraint satisfaction search for the VRPTW.
//!
//! Every customer is a variable whose domain is the set of vehicles that may
//! still serve it. The pieces:
//!
//! - [`DomainStore`] — candidate vehicles per customer, restored through a trail
//! - [`RouteTable`] — routes and assignment, with cached end-of-route state
//! - [`propagation`] — forward checking and the arc consistency sweep
//! - [`Backtracking`] — MRV/LCV depth-first search
//! - [`CspSolver`] — the vehicle-count minimization loop

mod domain;
pub mod propagation;
mod routes;
mod search;
mod solver;

pub use domain::{DomainCheckpoint, DomainStore};
pub use routes::{RouteCheckpoint, RouteTable};
pub use search::Backtracking;
pub use solver::{solve, CspSolver};
