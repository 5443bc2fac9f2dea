//! Input and output: parameter files and Solomon-format instances.

mod instance;
mod parameters;

use std::path::Path;

pub use instance::{parse_solomon, read_solomon, save_solomon, write_solomon, SolomonInstance};
pub use parameters::{parse_parameters, read_parameters, InputParameters, PARAMETERS_FILE};

use crate::error::Result;
use crate::models::ProblemInstance;

/// Loads the problem described by `dir/parameters.txt`: the instance file
/// it names, with its capacity and heuristic parameters.
pub fn read_problem(dir: impl AsRef<Path>) -> Result<ProblemInstance> {
    read_problem_with(dir, |input| input)
}

/// Like [`read_problem`], with `adjust` applied to the parameter file
/// contents before the instance file is loaded.
pub fn read_problem_with<F>(dir: impl AsRef<Path>, adjust: F) -> Result<ProblemInstance>
where
    F: FnOnce(InputParameters) -> InputParameters,
{
    let input = adjust(read_parameters(dir)?);
    read_solomon(&input.instance_path)?.into_problem(Some(input.capacity), input.parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_problem_from_directory() {
        let dir = std::env::temp_dir().join(format!("mtvrptw-io-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create dir");
        fs::write(dir.join(PARAMETERS_FILE), "tiny.txt\n2 30 0.5 0.5 4\n").expect("write");
        fs::write(
            dir.join("tiny.txt"),
            "TINY\n\n 0 0 0 0 0 100 0\n 1 3 4 10 0 50 5\n 2 6 8 10 0 60 5\n",
        )
        .expect("write");

        let inst = read_problem(&dir).expect("valid");
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.capacity(), 30);
        assert_eq!(inst.parameters().neighbourhood_size, 4);

        let adjusted = read_problem_with(&dir, |mut input| {
            input.capacity = 12;
            input.parameters.neighbourhood_size = 1;
            input
        })
        .expect("valid");
        assert_eq!(adjusted.capacity(), 12);
        assert_eq!(adjusted.parameters().neighbourhood_size, 1);
        assert_eq!(adjusted.nodes(), inst.nodes());

        // Demand 10 no longer fits.
        let too_small = read_problem_with(&dir, |mut input| {
            input.capacity = 5;
            input
        });
        assert!(matches!(too_small, Err(crate::Error::UnservableCustomer { .. })));
        fs::remove_dir_all(&dir).expect("cleanup");
    }
}
