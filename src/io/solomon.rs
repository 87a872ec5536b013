//! Reader for Solomon-style VRPTW instance files.
//!
//! Two header layouts are accepted for the fleet:
//!
//! ```text
//! VEHICLE NUMBER 25          VEHICLE
//! CAPACITY 200               NUMBER     CAPACITY
//!                              25         200
//! ```
//!
//! followed by a `CUST NO.` header and one line per record
//! (`id x y demand ready due service`), the depot first.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::{Customer, Problem, TimeWindow};

/// Reads and parses the instance at `path`.
pub fn read_solomon(path: impl AsRef<Path>, max_customers: Option<usize>) -> Result<Problem> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    parse_solomon(&text, max_customers).with_context(|| format!("invalid instance {}", path.display()))
}

/// Parses an instance from its text.
///
/// With `max_customers`, only the first that many records (depot included)
/// are kept. A limit of zero means no limit.
///
/// # Examples
///
/// ```
/// use vrptw_csp::io::parse_solomon;
///
/// let text = "C101\n\
///     VEHICLE\n\
///     NUMBER     CAPACITY\n  \
///       25         200\n\
///     CUSTOMER\n\
///     CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE TIME\n\
///     0      40         50          0          0       1236          0\n\
///     1      45         68         10        912        967         90\n";
/// let problem = parse_solomon(text, None).unwrap();
/// assert_eq!(problem.fleet_size(), 25);
/// assert_eq!(problem.capacity(), 200);
/// assert_eq!(problem.num_customers(), 1);
/// ```
pub fn parse_solomon(text: &str, max_customers: Option<usize>) -> Result<Problem> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let mut fleet_size: Option<usize> = None;
    let mut capacity: Option<i32> = None;
    let mut customers = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let (line_no, line) = lines[i];
        let upper = line.to_ascii_uppercase();
        if upper.starts_with("VEHICLE NUMBER") {
            fleet_size = Some(parse_last(line_no, line, "vehicle number")?);
        } else if upper.starts_with("CAPACITY") {
            capacity = Some(parse_last(line_no, line, "capacity")?);
        } else if upper.starts_with("NUMBER") && upper.contains("CAPACITY") {
            let &(values_no, values) = lines
                .get(i + 1)
                .with_context(|| format!("line {line_no}: fleet header without values"))?;
            let mut tokens = values.split_whitespace();
            fleet_size = Some(parse_token(values_no, tokens.next(), "vehicle number")?);
            capacity = Some(parse_token(values_no, tokens.next(), "capacity")?);
            i += 1;
        } else if upper.starts_with("CUST NO") {
            for &(record_no, record) in &lines[i + 1..] {
                let tokens: Vec<&str> = record.split_whitespace().collect();
                if tokens.len() >= 7 {
                    customers.push(parse_customer(record_no, &tokens)?);
                }
            }
            break;
        }
        i += 1;
    }

    let Some(fleet_size) = fleet_size else {
        bail!("missing vehicle number");
    };
    let Some(capacity) = capacity else {
        bail!("missing vehicle capacity");
    };
    if let Some(limit) = max_customers.filter(|&n| n > 0) {
        customers.truncate(limit);
    }
    if customers.is_empty() {
        bail!("no customer records");
    }

    Ok(Problem::new(customers, capacity, fleet_size))
}

fn parse_last<T>(line_no: usize, line: &str, field: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_token(line_no, line.split_whitespace().last(), field)
}

fn parse_token<T>(line_no: usize, token: Option<&str>, field: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let token = token.with_context(|| format!("line {line_no}: missing {field}"))?;
    token
        .parse()
        .with_context(|| format!("line {line_no}: invalid {field} {token:?}"))
}

fn parse_customer(line_no: usize, tokens: &[&str]) -> Result<Customer> {
    let id: usize = parse_token(line_no, Some(tokens[0]), "customer number")?;
    let x: f64 = parse_token(line_no, Some(tokens[1]), "x coordinate")?;
    let y: f64 = parse_token(line_no, Some(tokens[2]), "y coordinate")?;
    let demand: i32 = parse_token(line_no, Some(tokens[3]), "demand")?;
    let ready: f64 = parse_token(line_no, Some(tokens[4]), "ready time")?;
    let due: f64 = parse_token(line_no, Some(tokens[5]), "due date")?;
    let service: f64 = parse_token(line_no, Some(tokens[6]), "service time")?;
    let window = TimeWindow::new(ready, due)
        .with_context(|| format!("line {line_no}: invalid time window [{ready}, {due}]"))?;
    Ok(Customer::new(id, x, y, demand, service).with_time_window(window))
}
