//! Tabular summary of solved instances.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::Solution;

const NO_SOLUTION: &str = "No Solution";
const ERROR: &str = "Error";

/// One line of the report: the outcome for one instance file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "Vehicles Used")]
    pub vehicles_used: String,
    #[serde(rename = "Total Distance")]
    pub total_distance: String,
    #[serde(rename = "Routes")]
    pub routes: String,
}

impl ReportRow {
    pub fn solved(file: impl Into<String>, solution: &Solution) -> Self {
        Self {
            file: file.into(),
            vehicles_used: solution.num_vehicles().to_string(),
            total_distance: solution.total_distance().to_string(),
            routes: format_routes(solution),
        }
    }

    pub fn no_solution(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            vehicles_used: NO_SOLUTION.to_string(),
            total_distance: NO_SOLUTION.to_string(),
            routes: NO_SOLUTION.to_string(),
        }
    }

    pub fn error(file: impl Into<String>, error: &anyhow::Error) -> Self {
        Self {
            file: file.into(),
            vehicles_used: ERROR.to_string(),
            total_distance: ERROR.to_string(),
            routes: format!("{error:#}"),
        }
    }

    pub fn is_error(&self) -> bool {
        self.vehicles_used == ERROR
    }
}

/// Renders routes one per line as `Route <n> : 0 <customers…> 0`, where `n`
/// is the 1-based vehicle index.
///
/// # Examples
///
/// ```
/// use vrptw_csp::io::format_routes;
/// use vrptw_csp::models::{Customer, Problem};
///
/// let problem = Problem::new(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 1.0, 0.0, 10, 0.0),
///         Customer::new(2, 2.0, 0.0, 10, 0.0),
///     ],
///     100,
///     1,
/// );
/// let solution = vrptw_csp::solve(&problem).unwrap();
/// assert_eq!(format_routes(&solution), "Route 1 : 0 1 2 0");
/// ```
pub fn format_routes(solution: &Solution) -> String {
    solution
        .routes()
        .iter()
        .map(|route| {
            let stops: Vec<String> = route.customers().iter().map(usize::to_string).collect();
            format!("Route {} : 0 {} 0", route.vehicle() + 1, stops.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Writes `rows` to `writer` in the given format.
pub fn write_report<W: Write>(rows: &[ReportRow], format: ReportFormat, mut writer: W) -> Result<()> {
    match format {
        ReportFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            for row in rows {
                csv.serialize(row).context("cannot write report row")?;
            }
            csv.flush().context("cannot flush report")?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows).context("cannot write report")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Writes `rows` to a new file at `path`.
pub fn write_report_file(rows: &[ReportRow], format: ReportFormat, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    write_report(rows, format, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Problem};

    fn solved_row() -> ReportRow {
        let problem = Problem::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 3.0, 4.0, 10, 0.0),
                Customer::new(2, -3.0, 4.0, 10, 0.0),
            ],
            15,
            2,
        );
        let solution = crate::solve(&problem).expect("feasible");
        ReportRow::solved("two.txt", &solution)
    }

    #[test]
    fn test_solved_row() {
        let row = solved_row();
        assert_eq!(row.vehicles_used, "2");
        assert_eq!(row.total_distance, "20");
        assert_eq!(row.routes, "Route 1 : 0 1 0\nRoute 2 : 0 2 0");
        assert!(!row.is_error());
    }

    #[test]
    fn test_no_solution_and_error_rows() {
        let row = ReportRow::no_solution("x.txt");
        assert_eq!(row.vehicles_used, "No Solution");
        assert_eq!(row.routes, "No Solution");

        let err = anyhow::anyhow!("missing vehicle number").context("invalid instance x.txt");
        let row = ReportRow::error("x.txt", &err);
        assert!(row.is_error());
        assert_eq!(row.total_distance, "Error");
        assert_eq!(row.routes, "invalid instance x.txt: missing vehicle number");
    }

    #[test]
    fn test_csv_output() {
        let rows = vec![solved_row(), ReportRow::no_solution("none.txt")];
        let mut buf = Vec::new();
        write_report(&rows, ReportFormat::Csv, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("File,Vehicles Used,Total Distance,Routes"));
        assert!(text.contains("\"Route 1 : 0 1 0\nRoute 2 : 0 2 0\""));
        assert!(text.contains("none.txt,No Solution,No Solution,No Solution"));
    }

    #[test]
    fn test_json_output() {
        let rows = vec![ReportRow::no_solution("none.txt")];
        let mut buf = Vec::new();
        write_report(&rows, ReportFormat::Json, &mut buf).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value[0]["File"], "none.txt");
        assert_eq!(value[0]["Vehicles Used"], "No Solution");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("xml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::default().to_string(), "csv");
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.csv");
        write_report_file(&[ReportRow::no_solution("a.txt")], ReportFormat::Csv, &path)
            .expect("write");
        let text = std::fs::read_to_string(&path).expect("read");
        assert!(text.starts_with("File,Vehicles Used"));
    }
}
