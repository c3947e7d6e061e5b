//! Command-line front end: reads a matrix file, reduces it and prints the
//! result.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gauss::prelude::*;

/// Reduce an augmented linear system to row-echelon form in parallel
#[derive(Parser, Debug)]
#[command(name = "gauss")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Matrix file: row and column counts followed by the values
    #[arg(value_name = "FILE", default_value = "matrix.txt")]
    file: PathBuf,

    /// Workers per elimination step (defaults to available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Pivot magnitude below which the system is treated as singular
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Number of times to run the elimination, each on a fresh copy
    #[arg(short = 'n', long, default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = read_matrix(&cli.file)
        .with_context(|| format!("could not load matrix from {}", cli.file.display()))?;
    println!("Matrix");
    print!("{}", format_matrix(&input, cli.epsilon));

    let mut config = EliminationConfig::default().with_epsilon(cli.epsilon);
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    let eliminator = Eliminator::new(config).context("invalid elimination settings")?;
    info!(
        rows = input.num_rows(),
        cols = input.num_cols(),
        workers = eliminator.config().workers,
        "loaded {}",
        cli.file.display()
    );

    let mut result = None;
    for iteration in 1..=cli.iterations {
        let mut matrix = input.clone();
        let started = Instant::now();
        let outcome = eliminator.eliminate(&mut matrix)?;
        info!(iteration, elapsed = ?started.elapsed(), ?outcome, "elimination finished");
        result = Some((outcome, matrix));
    }

    match result {
        Some((Outcome::Solved, matrix)) => print!("{}", format_matrix(&matrix, cli.epsilon)),
        Some((Outcome::Singular { .. }, _)) => println!("System has no solution"),
        None => {}
    }

    Ok(())
}
