//! Puzzle CLI - run the puzzle solvers over local input files

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Import puzzle-days to link the solver plugins
use puzzle_days as _;

use aggregator::{DayKey, OutputAggregator};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::OutputFormatter;
use puzzle_solver::{RegistryBuilder, SolverRegistry};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    init_logging(config.log_level());

    let registry = build_registry(&config.tags)?;
    tracing::debug!(solvers = registry.len(), "registry built");

    let executor = Executor::new(registry, &config)?;
    if executor.collect_work_items().is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    run_executor(executor, &config)
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_logging(default_level: &str) {
    let fmt = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(filter).with(fmt).init();
}

/// Run the executor and print outputs in (year, day) order as they arrive
fn run_executor(executor: Executor, config: &Config) -> Result<(), CliError> {
    let work_items = executor.collect_work_items();
    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys = work_items.iter().map(|w| DayKey {
        year: w.year,
        day: w.day,
    });
    let mut aggregator = OutputAggregator::new(expected_keys);

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(config.quiet, config.visualize);
    let mut outputs = Vec::new();

    for output in rx {
        for ready in aggregator.add(output) {
            formatter.print_output(&ready);
            outputs.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_output(&ready);
        outputs.push(ready);
    }

    if !aggregator.is_complete() {
        tracing::warn!("not all expected outputs were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&outputs);

    Ok(())
}

/// Build registry with tag filtering; a solver must carry every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
