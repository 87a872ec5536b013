//! Route feasibility checking and solution evaluation.
//!
//! - [`FeasibilityChecker`] — incremental capacity/time-window checks used by the search
//! - [`RouteEvaluator`] — timed routes and full violation reports for finished solutions

mod evaluator;
mod feasibility;

pub use evaluator::RouteEvaluator;
pub use feasibility::{FeasibilityChecker, RouteState};
