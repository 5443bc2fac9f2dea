//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::evaluation::TieBreak;

/// Run-time options of the solver, threaded explicitly into every entry
/// point. The heuristic's own parameters live in
/// [`Parameters`](crate::models::Parameters).
///
/// # Examples
///
/// ```
/// use mtvrptw::solver::SolverConfig;
/// use mtvrptw::evaluation::TieBreak;
///
/// let config = SolverConfig::default()
///     .with_parallel(false)
///     .with_max_improve_iterations(20)
///     .with_tie_break(TieBreak::TotalDistance);
/// assert!(!config.parallel);
/// assert_eq!(config.max_improve_iterations, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Run cluster-count candidates, clusters, and local-search
    /// neighbours on the rayon pool.
    pub parallel: bool,
    /// Worker threads for a dedicated pool (None = rayon's global pool).
    pub num_threads: Option<usize>,
    /// Run the local search after construction.
    pub improve: bool,
    /// Cap on local-search passes per candidate.
    pub max_improve_iterations: usize,
    /// Cap on merger eliminations (None = run to the fixed point).
    pub max_merge_passes: Option<usize>,
    /// Secondary criterion when route counts tie.
    pub tie_break: TieBreak,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            num_threads: None,
            improve: true,
            max_improve_iterations: 100,
            max_merge_passes: None,
            tie_break: TieBreak::ShortestRoute,
        }
    }
}

impl SolverConfig {
    /// Single-threaded configuration; results are identical either way,
    /// this only avoids the thread pool.
    pub fn sequential() -> Self {
        Self::default().with_parallel(false)
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Uses a dedicated pool of `n` worker threads.
    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Enables or disables the local-search phase.
    pub fn with_improve(mut self, improve: bool) -> Self {
        self.improve = improve;
        self
    }

    /// Sets the cap on local-search passes.
    pub fn with_max_improve_iterations(mut self, n: usize) -> Self {
        self.max_improve_iterations = n;
        self
    }

    /// Sets the cap on merger eliminations.
    pub fn with_max_merge_passes(mut self, n: usize) -> Self {
        self.max_merge_passes = Some(n);
        self
    }

    /// Sets the tie-break criterion.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}
