//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::input;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Input directory path
    pub input_dir: PathBuf,
    /// Input given with `--input`, already read; used for every selected day
    pub explicit_input: Option<String>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Print visualization payloads
    pub visualize: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Verbose logging
    pub verbose: bool,
}

impl Config {
    /// Build config from CLI args, reading an explicit input once up front
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = args.threads.unwrap_or_else(num_cpus);
        if thread_count == 0 {
            return Err(CliError::Config("--threads must be at least 1".to_string()));
        }

        let explicit_input = args
            .input
            .as_deref()
            .map(|path| input::read_explicit(&expand_tilde(path)))
            .transpose()?;

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            explicit_input,
            thread_count,
            parallelize_by: args.parallelize_by,
            visualize: args.visualize,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
