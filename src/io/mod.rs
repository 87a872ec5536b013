//! Instance files in, reports out.
//!
//! - [`solomon`] — Solomon-format instance reader
//! - [`report`] — per-instance summary rows as CSV or JSON
//! - [`batch`] — solve every instance of a directory

pub mod batch;
pub mod report;
pub mod solomon;

pub use batch::{discover_instances, process_instance, run_batch};
pub use report::{format_routes, write_report, write_report_file, ReportFormat, ReportRow};
pub use solomon::{parse_solomon, read_solomon};
