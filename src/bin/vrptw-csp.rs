use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{arg, Command};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vrptw_csp::io::{process_instance, run_batch, write_report, write_report_file, ReportFormat};
use vrptw_csp::{BatchConfig, SolverConfig};

fn cli() -> Command {
    Command::new("vrptw-csp")
        .about("Solves Solomon VRPTW instances with constraint propagation and backtracking")
        .arg_required_else_help(true)
        .arg(
            arg!(<INPUT> "Instance file, or a directory of instance files")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-o --output <PATH> "Write the report to a file instead of stdout")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-f --format <FORMAT> "Report format")
                .required(false)
                .value_parser(["csv", "json"])
                .default_value("csv"),
        )
        .arg(
            arg!(--extension <EXT> "Extension of instance files in a directory")
                .required(false)
                .default_value("txt"),
        )
        .arg(
            arg!(--"max-customers" <N> "Keep only the first N records of each instance, depot included (0 = all)")
                .required(false)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"max-vehicles" <N> "Largest vehicle count to try")
                .required(false)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--"no-arc-consistency" "Skip the arc consistency sweep"))
        .arg(arg!(--"no-forward-checking" "Skip forward checking after each assignment"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let matches = cli().get_matches();

    let input = matches
        .get_one::<PathBuf>("INPUT")
        .context("missing input path")?;
    let format: ReportFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv")
        .parse()
        .map_err(anyhow::Error::msg)?;

    let mut solver = SolverConfig::default()
        .with_arc_consistency(!matches.get_flag("no-arc-consistency"))
        .with_forward_checking(!matches.get_flag("no-forward-checking"));
    if let Some(&max_vehicles) = matches.get_one::<usize>("max-vehicles") {
        solver = solver.with_max_vehicles(max_vehicles);
    }
    let mut config = BatchConfig::default().with_solver(solver);
    if let Some(extension) = matches.get_one::<String>("extension") {
        config = config.with_extension(extension.as_str());
    }
    if let Some(&max_customers) = matches.get_one::<usize>("max-customers") {
        config = config.with_max_customers(max_customers);
    }

    let rows = if input.is_dir() {
        run_batch(input, &config)?
    } else {
        vec![process_instance(input, &config)]
    };

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            write_report_file(&rows, format, path)?;
            info!(path = %path.display(), rows = rows.len(), "report written");
        }
        None => write_report(&rows, format, std::io::stdout().lock())?,
    }
    Ok(())
}
