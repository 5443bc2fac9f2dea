//! `parameters.txt` reader.
//!
//! The file holds, in order: the instance file name (first line, relative
//! to the input directory), the cluster-count threshold, the vehicle
//! capacity, alpha1, alpha2 and the neighbourhood size p. Everything after
//! the first line is whitespace-separated.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::Parameters;

/// Name of the parameter file inside an input directory.
pub const PARAMETERS_FILE: &str = "parameters.txt";

/// Contents of a parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct InputParameters {
    /// Instance file, resolved against the input directory.
    pub instance_path: PathBuf,
    /// Vehicle capacity; overrides any capacity found in the instance file.
    pub capacity: i32,
    /// Heuristic parameters.
    pub parameters: Parameters,
}

/// Reads `dir/parameters.txt`.
pub fn read_parameters(dir: impl AsRef<Path>) -> Result<InputParameters> {
    let dir = dir.as_ref();
    let path = dir.join(PARAMETERS_FILE);
    let text = fs::read_to_string(&path)?;
    parse_parameters(&text, dir, &path)
}

/// Parses parameter-file text. `dir` resolves the instance file name and
/// `source` only labels errors.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mtvrptw::io::parse_parameters;
///
/// let text = "C101.txt\n3 200\n0.5 0.5 10\n";
/// let input = parse_parameters(text, Path::new("input"), Path::new("parameters.txt")).unwrap();
/// assert_eq!(input.instance_path, Path::new("input/C101.txt"));
/// assert_eq!(input.capacity, 200);
/// assert_eq!(input.parameters.neighbourhood_size, 10);
/// ```
pub fn parse_parameters(text: &str, dir: &Path, source: &Path) -> Result<InputParameters> {
    let mut lines = text.lines().enumerate();
    let instance_name = lines
        .by_ref()
        .map(|(_, line)| line.trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::parse(source, 1, "missing instance file name"))?;

    let mut tokens = lines.flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));
    let last_line = text.lines().count().max(1);

    let num_clusters_threshold =
        next_value(&mut tokens, source, last_line, "cluster-count threshold")?;
    let capacity = next_value(&mut tokens, source, last_line, "vehicle capacity")?;
    let alpha1 = next_value(&mut tokens, source, last_line, "alpha1")?;
    let alpha2 = next_value(&mut tokens, source, last_line, "alpha2")?;
    let neighbourhood_size = next_value(&mut tokens, source, last_line, "neighbourhood size")?;

    let parameters = Parameters {
        num_clusters_threshold,
        alpha1,
        alpha2,
        neighbourhood_size,
    };
    parameters.validate()?;

    Ok(InputParameters {
        instance_path: dir.join(instance_name),
        capacity,
        parameters,
    })
}

fn next_value<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = (usize, &'a str)>,
    source: &Path,
    last_line: usize,
    name: &str,
) -> Result<T> {
    let (line, token) = tokens
        .next()
        .ok_or_else(|| Error::parse(source, last_line, format!("missing {name}")))?;
    token
        .parse()
        .map_err(|_| Error::parse(source, line, format!("unexpected {name} '{token}'")))
}
