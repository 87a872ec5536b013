//! # vrptw-csp
//!
//! Vehicle routing with time windows solved as a constraint satisfaction
//! problem. Customers are variables, vehicles are values; arc consistency
//! and forward checking prune the domains, and a backtracking search with
//! MRV/LCV ordering builds routes under an increasing vehicle cap so that the
//! first solution found uses as few vehicles as possible.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Problem, Route, Solution)
//! - [`distance`] — Euclidean distance matrix
//! - [`evaluation`] — Route feasibility checking and solution verification
//! - [`csp`] — Domains, propagation, backtracking, and the minimization loop
//! - [`io`] — Solomon instance reader, reports, and directory runs
//! - [`config`] — Solver and batch options

pub mod config;
pub mod csp;
pub mod distance;
pub mod evaluation;
pub mod io;
pub mod models;

pub use config::{BatchConfig, SolverConfig};
pub use csp::{solve, CspSolver};
