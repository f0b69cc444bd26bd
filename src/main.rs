//! sparsekmeans CLI - cluster a tab-separated sparse feature file

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use sparsekmeans::{write_assignments_to, Dataset, KMeansConfig, SparseKMeans, DEFAULT_DIMENSION};

#[derive(Parser, Debug)]
#[command(name = "sparsekmeans")]
#[command(about = "Parallel k-means over sparse feature vectors", long_about = None)]
struct Cli {
    /// Number of clusters
    cluster_count: usize,

    /// Number of iterations to run
    iteration_count: usize,

    /// Number of worker threads
    worker_count: usize,

    /// Input file, one `id<TAB>index:weight,...` record per line
    input: PathBuf,

    /// Output file for `id<TAB>cluster` lines (stdout if omitted)
    output: Option<PathBuf>,

    /// Dimensionality of the feature space
    #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,

    /// Seed for centroid selection and tie fallbacks
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> sparsekmeans::Result<()> {
    let mut config = KMeansConfig::new(cli.cluster_count, cli.iteration_count, cli.worker_count)
        .with_dimension(cli.dimension);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    let output = cli
        .output
        .as_ref()
        .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
    info!(
        cluster_count = config.cluster_count,
        iteration_count = config.iteration_count,
        worker_count = config.worker_count,
        input = %cli.input.display(),
        output = %output,
        "configuration"
    );

    let dataset = Dataset::load(&cli.input, config.dimension)?;

    let start = Instant::now();
    let result = SparseKMeans::fit(&dataset.vectors, config)?;
    info!(elapsed = ?start.elapsed(), "clustering finished");

    write_assignments_to(cli.output.as_deref(), &dataset.ids, &result.assignments)
}
