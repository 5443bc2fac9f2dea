//! mtvrptw - command line interface
//!
//! Solves MTVRPTW instances with the cluster-route-merge heuristic and
//! generates random Solomon-format instances.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, LevelFilter};

use mtvrptw::evaluation::TieBreak;
use mtvrptw::generator::{generate, GeneratorConfig};
use mtvrptw::io::{read_problem_with, read_solomon, save_solomon, InputParameters};
use mtvrptw::models::{Parameters, ProblemInstance};
use mtvrptw::solver::{solve, SolverConfig};
use mtvrptw::Result;

#[derive(Parser)]
#[command(name = "mtvrptw")]
#[command(version)]
#[command(about = "Multi-trip VRP with time windows: cluster, route, merge, relocate")]
struct Cli {
    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance
    Solve {
        /// Input directory containing parameters.txt (default: ./input)
        #[arg(short, long, conflicts_with = "instance")]
        dir: Option<PathBuf>,

        /// Solomon instance file, used with the parameter flags below
        #[arg(short, long)]
        instance: Option<PathBuf>,

        /// Vehicle capacity (defaults to the instance header)
        #[arg(long)]
        capacity: Option<i32>,

        /// Largest cluster count to try
        #[arg(long)]
        threshold: Option<usize>,

        /// Detour weight of the insertion cost
        #[arg(long)]
        alpha1: Option<f64>,

        /// Push-forward weight of the insertion cost
        #[arg(long)]
        alpha2: Option<f64>,

        /// Insertion positions examined per route during construction
        #[arg(short = 'p', long)]
        neighbourhood_size: Option<usize>,

        /// Run single-threaded
        #[arg(long)]
        sequential: bool,

        /// Worker threads (defaults to one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Skip the relocate local search
        #[arg(long)]
        no_improve: bool,

        /// Cap on relocate passes per cluster count
        #[arg(long, default_value = "100")]
        max_iterations: usize,

        /// Cap on merger eliminations
        #[arg(long)]
        max_merge_passes: Option<usize>,

        /// Secondary criterion when route counts tie
        #[arg(long, value_enum, default_value = "shortest-route")]
        tie_break: TieBreakArg,

        /// Write the best solution as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a random instance in Solomon format
    Generate {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of customers
        #[arg(short, long, default_value = "100")]
        customers: usize,

        /// Vehicle capacity
        #[arg(long, default_value = "200")]
        capacity: i32,

        /// Number of vehicles written to the header
        #[arg(long, default_value = "25")]
        vehicles: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum TieBreakArg {
    /// Shortest route first
    ShortestRoute,
    /// Total travelled distance
    TotalDistance,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::ShortestRoute => TieBreak::ShortestRoute,
            TieBreakArg::TotalDistance => TieBreak::TotalDistance,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Solve {
            dir,
            instance,
            capacity,
            threshold,
            alpha1,
            alpha2,
            neighbourhood_size,
            sequential,
            threads,
            no_improve,
            max_iterations,
            max_merge_passes,
            tie_break,
            output,
        } => {
            let overrides = ParameterOverrides {
                capacity,
                threshold,
                alpha1,
                alpha2,
                neighbourhood_size,
            };
            let mut config = SolverConfig::default()
                .with_parallel(!sequential)
                .with_improve(!no_improve)
                .with_max_improve_iterations(max_iterations)
                .with_tie_break(tie_break.into());
            if let Some(n) = threads {
                config = config.with_num_threads(n);
            }
            if let Some(n) = max_merge_passes {
                config = config.with_max_merge_passes(n);
            }
            load_instance(dir.as_deref(), instance.as_deref(), &overrides)
                .and_then(|inst| run_solve(&inst, &config, output.as_deref()))
        }
        Commands::Generate {
            output,
            customers,
            capacity,
            vehicles,
            seed,
        } => run_generate(&output, customers, capacity, vehicles, seed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

struct ParameterOverrides {
    capacity: Option<i32>,
    threshold: Option<usize>,
    alpha1: Option<f64>,
    alpha2: Option<f64>,
    neighbourhood_size: Option<usize>,
}

impl ParameterOverrides {
    fn apply(&self, mut params: Parameters) -> Parameters {
        if let Some(k) = self.threshold {
            params.num_clusters_threshold = k;
        }
        if let Some(a) = self.alpha1 {
            params.alpha1 = a;
        }
        if let Some(a) = self.alpha2 {
            params.alpha2 = a;
        }
        if let Some(p) = self.neighbourhood_size {
            params.neighbourhood_size = p;
        }
        params
    }

    fn apply_to_input(&self, mut input: InputParameters) -> InputParameters {
        if let Some(capacity) = self.capacity {
            input.capacity = capacity;
        }
        input.parameters = self.apply(input.parameters);
        input
    }
}

fn load_instance(
    dir: Option<&Path>,
    instance: Option<&Path>,
    overrides: &ParameterOverrides,
) -> Result<ProblemInstance> {
    match (dir, instance) {
        (_, Some(file)) => {
            info!("Reading instance {}", file.display());
            read_solomon(file)?
                .into_problem(overrides.capacity, overrides.apply(Parameters::default()))
        }
        (Some(dir), None) => {
            info!("Reading input from {}", dir.display());
            read_problem_with(dir, |input| overrides.apply_to_input(input))
        }
        (None, None) => load_instance(Some(Path::new("input")), None, overrides),
    }
}

fn run_solve(
    instance: &ProblemInstance,
    config: &SolverConfig,
    output: Option<&Path>,
) -> Result<()> {
    info!(
        "{} customers, capacity {}, K = 1..={}",
        instance.num_customers(),
        instance.capacity(),
        instance.parameters().num_clusters_threshold
    );

    let best = solve(instance, config)?;

    println!("Best cluster count: {}", best.num_clusters);
    println!("Routes: {}", best.solution.num_routes());
    println!(
        "Total distance: {:.2}",
        best.solution.total_distance(instance.distances())
    );
    for (i, route) in best.solution.routes().iter().enumerate() {
        let stops: Vec<String> = route.nodes().iter().map(|n| n.to_string()).collect();
        println!("  route {:>3}: {}", i + 1, stops.join(" "));
    }

    if let Some(path) = output {
        fs::write(path, serde_json::to_string_pretty(&best)?)?;
        info!("Solution written to {}", path.display());
    }
    Ok(())
}

fn run_generate(
    output: &Path,
    customers: usize,
    capacity: i32,
    vehicles: usize,
    seed: u64,
) -> Result<()> {
    let config = GeneratorConfig::default()
        .with_num_customers(customers)
        .with_capacity(capacity);
    let instance = generate(&config, Parameters::default(), seed)?;
    let name = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("RANDOM{seed}"));
    save_solomon(output, &name, vehicles, &instance)?;
    info!(
        "Wrote {} customers to {}",
        instance.num_customers(),
        output.display()
    );
    Ok(())
}
