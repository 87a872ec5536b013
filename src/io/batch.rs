//! Directory runs: solve every instance file and tabulate the outcomes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{read_solomon, ReportRow};
use crate::config::BatchConfig;
use crate::csp::CspSolver;

/// Files in `dir` with the given extension, sorted by name.
pub fn discover_instances(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("cannot list {}", dir.display()))?
            .path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads and solves one instance file.
///
/// Never fails: loader errors become an error row.
pub fn process_instance(path: &Path, config: &BatchConfig) -> ReportRow {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let problem = match read_solomon(path, config.max_customers) {
        Ok(problem) => problem,
        Err(err) => {
            warn!(file = %name, error = %format!("{err:#}"), "cannot load instance");
            return ReportRow::error(name, &err);
        }
    };

    info!(
        file = %name,
        customers = problem.num_customers(),
        fleet = problem.fleet_size(),
        "processing instance"
    );
    match CspSolver::new(&problem).with_config(config.solver.clone()).solve() {
        Some(solution) => ReportRow::solved(name, &solution),
        None => ReportRow::no_solution(name),
    }
}

/// Solves every instance in `dir`, one report row per file.
///
/// Only failing to list the directory is an error; a broken instance is
/// recorded in its row and the run continues.
pub fn run_batch(dir: impl AsRef<Path>, config: &BatchConfig) -> Result<Vec<ReportRow>> {
    let files = discover_instances(dir, &config.extension)?;
    info!(instances = files.len(), "starting batch");
    let rows: Vec<ReportRow> = files
        .iter()
        .map(|path| process_instance(path, config))
        .collect();
    let failed = rows.iter().filter(|r| r.is_error()).count();
    info!(instances = rows.len(), failed, "batch finished");
    Ok(rows)
}
