//! Solomon-format instance files.
//!
//! ```text
//! C101
//!
//! VEHICLE
//! NUMBER     CAPACITY
//!   25         200
//!
//! CUSTOMER
//! CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE TIME
//!     0      40         50          0          0       1236          0
//!     1      45         68         10        912        967         90
//! ```
//!
//! Lines starting with a number are data: a two-value line before the
//! first node is the vehicle header, seven-value lines are nodes
//! (`id x y demand ready due service`, depot first). Other lines are
//! ignored.
//!
//! A Solomon `DUE DATE` is the latest time service may start, while a
//! [`TimeWindow`] due time is the latest time service may end. Reading
//! adds the service time to the due date and writing subtracts it again.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Customer, Parameters, ProblemInstance, TimeWindow};

/// Raw contents of a Solomon file, before capacity and parameters are
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SolomonInstance {
    /// First non-empty line of the file.
    pub name: String,
    /// Vehicle capacity from the header, if present.
    pub capacity: Option<i32>,
    /// Depot followed by the customers, in file order.
    pub nodes: Vec<Customer>,
}

impl SolomonInstance {
    /// Builds a validated [`ProblemInstance`]. `capacity` wins over the
    /// header capacity; one of the two must be present.
    pub fn into_problem(
        self,
        capacity: Option<i32>,
        parameters: Parameters,
    ) -> Result<ProblemInstance> {
        let capacity = capacity
            .or(self.capacity)
            .ok_or_else(|| Error::invalid_instance("no vehicle capacity given"))?;
        let mut nodes = self.nodes.into_iter();
        let depot = nodes
            .next()
            .ok_or_else(|| Error::invalid_instance("instance has no depot row"))?;
        ProblemInstance::new(depot, nodes.collect(), capacity, parameters)
    }
}

/// Reads a Solomon file.
pub fn read_solomon(path: impl AsRef<Path>) -> Result<SolomonInstance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_solomon(&text, path)
}

/// Parses Solomon text; `source` only labels errors.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mtvrptw::io::parse_solomon;
///
/// let text = "\
/// TINY
/// VEHICLE
/// NUMBER CAPACITY
///   2      50
/// CUSTOMER
///   0  0  0   0   0  100  0
///   1  3  4  10  10   40  5
/// ";
/// let raw = parse_solomon(text, Path::new("tiny.txt")).unwrap();
/// assert_eq!(raw.name, "TINY");
/// assert_eq!(raw.capacity, Some(50));
/// assert_eq!(raw.nodes.len(), 2);
/// ```
pub fn parse_solomon(text: &str, source: &Path) -> Result<SolomonInstance> {
    let mut name = None;
    let mut capacity = None;
    let mut nodes = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = fields.first() else {
            continue;
        };
        if name.is_none() {
            name = Some(line.trim().to_string());
            continue;
        }
        if first.parse::<f64>().is_err() {
            continue;
        }

        match fields.len() {
            2 if nodes.is_empty() => {
                field::<usize>(source, line_no, fields[0], "vehicle count")?;
                capacity = Some(field(source, line_no, fields[1], "capacity")?);
            }
            7 => nodes.push(parse_node(source, line_no, &fields)?),
            n => {
                return Err(Error::parse(
                    source,
                    line_no,
                    format!("expected 7 values per node, found {n}"),
                ))
            }
        }
    }

    Ok(SolomonInstance {
        name: name.unwrap_or_default(),
        capacity,
        nodes,
    })
}

fn parse_node(source: &Path, line_no: usize, fields: &[&str]) -> Result<Customer> {
    let id = field(source, line_no, fields[0], "node id")?;
    let x = field(source, line_no, fields[1], "x coordinate")?;
    let y = field(source, line_no, fields[2], "y coordinate")?;
    let demand = field(source, line_no, fields[3], "demand")?;
    let ready = field(source, line_no, fields[4], "ready time")?;
    let latest_start: f64 = field(source, line_no, fields[5], "due date")?;
    let service: f64 = field(source, line_no, fields[6], "service time")?;
    if latest_start < ready {
        return Err(Error::parse(
            source,
            line_no,
            format!("invalid time window [{ready}, {latest_start}]"),
        ));
    }
    let tw = TimeWindow::new(ready, latest_start + service).ok_or_else(|| {
        Error::parse(
            source,
            line_no,
            format!("invalid time window [{ready}, {latest_start}]"),
        )
    })?;
    Ok(Customer::new(id, x, y, demand, service).with_time_window(tw))
}

fn field<T: std::str::FromStr>(source: &Path, line_no: usize, raw: &str, what: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::parse(source, line_no, format!("invalid {what} '{raw}'")))
}

/// Writes `instance` in Solomon format.
pub fn write_solomon<W: Write>(
    mut out: W,
    name: &str,
    num_vehicles: usize,
    instance: &ProblemInstance,
) -> Result<()> {
    writeln!(out, "{name}")?;
    writeln!(out)?;
    writeln!(out, "VEHICLE")?;
    writeln!(out, "NUMBER     CAPACITY")?;
    writeln!(out, "{num_vehicles:>5} {:>12}", instance.capacity())?;
    writeln!(out)?;
    writeln!(out, "CUSTOMER")?;
    writeln!(
        out,
        "CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE TIME"
    )?;
    writeln!(out)?;
    for node in instance.nodes() {
        writeln!(
            out,
            "{:>5} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            node.id(),
            node.x(),
            node.y(),
            node.demand(),
            node.ready(),
            node.due() - node.service_duration(),
            node.service_duration()
        )?;
    }
    Ok(())
}

/// Writes `instance` to `path` in Solomon format.
pub fn save_solomon(
    path: impl AsRef<Path>,
    name: &str,
    num_vehicles: usize,
    instance: &ProblemInstance,
) -> Result<()> {
    let mut buf = Vec::new();
    write_solomon(&mut buf, name, num_vehicles, instance)?;
    fs::write(path, buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::validate_solution;
    use crate::solver::{solve, SolverConfig};

    const C101_HEAD: &str = "C101

VEHICLE
NUMBER     CAPACITY
  25         200

CUSTOMER
CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE   TIME

    0      40         50          0          0       1236          0
    1      45         68         10        912        967         90
    2      45         70         30        825        870         90
    3      42         66         10         65        146         90
";

    fn source() -> &'static Path {
        Path::new("C101.txt")
    }

    #[test]
    fn test_parse_header_and_nodes() {
        let raw = parse_solomon(C101_HEAD, source()).expect("valid");
        assert_eq!(raw.name, "C101");
        assert_eq!(raw.capacity, Some(200));
        assert_eq!(raw.nodes.len(), 4);
        assert_eq!(raw.nodes[3].ready(), 65.0);
        assert_eq!(raw.nodes[3].service_duration(), 90.0);
    }

    #[test]
    fn test_due_date_becomes_end_of_service() {
        let raw = parse_solomon(C101_HEAD, source()).expect("valid");
        assert_eq!(raw.nodes[0].due(), 1236.0);
        assert_eq!(raw.nodes[1].due(), 967.0 + 90.0);
        assert_eq!(raw.nodes[3].due(), 146.0 + 90.0);
    }

    #[test]
    fn test_benchmark_rows_load_and_solve() {
        let inst = parse_solomon(C101_HEAD, source())
            .expect("valid")
            .into_problem(None, Parameters::default())
            .expect("every C101 customer is servable");
        assert_eq!(inst.num_customers(), 3);

        // 3 (65..155), then 2 and 1 fit on one vehicle with 50 of 200 units.
        let best = solve(&inst, &SolverConfig::sequential()).expect("valid");
        assert_eq!(best.solution.num_served(), 3);
        assert_eq!(best.solution.num_routes(), 1);
        assert!(validate_solution(&inst, &best.solution).is_empty());
    }

    #[test]
    fn test_capacity_override() {
        let raw = parse_solomon(C101_HEAD, source()).expect("valid");
        let inst = raw
            .clone()
            .into_problem(Some(120), Parameters::default())
            .expect("valid");
        assert_eq!(inst.capacity(), 120);
        let inst = raw.into_problem(None, Parameters::default()).expect("valid");
        assert_eq!(inst.capacity(), 200);
        assert_eq!(inst.num_customers(), 3);
    }

    #[test]
    fn test_bad_row_reports_line() {
        let text = "X\n0 0 0 0 0 100 0\n1 1 1 5 0\n";
        match parse_solomon(text, source()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_inverted_window_rejected() {
        let text = "X\n0 0 0 0 0 100 0\n1 1 1 5 50 10 0\n";
        assert!(matches!(
            parse_solomon(text, source()),
            Err(Error::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_capacity() {
        let text = "X\n0 0 0 0 0 100 0\n1 1 1 5 0 50 0\n";
        let raw = parse_solomon(text, source()).expect("valid");
        assert!(matches!(
            raw.into_problem(None, Parameters::default()),
            Err(Error::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_write_then_read_back() {
        let inst = parse_solomon(C101_HEAD, source())
            .expect("valid")
            .into_problem(None, Parameters::default())
            .expect("valid");
        let mut buf = Vec::new();
        write_solomon(&mut buf, "C101", 25, &inst).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let back = parse_solomon(&text, source()).expect("valid");
        assert_eq!(back.capacity, Some(200));
        assert_eq!(back.nodes, inst.nodes().to_vec());
        assert!(text.contains("967"));
    }
}
