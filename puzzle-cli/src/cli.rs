//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; run every day in order on the current thread
    Sequential,
    /// Parallelize across years; days run in order within each year
    Year,
    /// Parallelize across year/day combinations (default)
    #[default]
    Day,
}

/// Puzzle solver runner
#[derive(Parser, Debug)]
#[command(name = "puzzle", about = "Run puzzle solvers over local input files", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Read the input from this file instead of the input directory; `-` reads stdin
    #[arg(short, long, requires = "day")]
    pub input: Option<PathBuf>,

    /// Directory holding `{year}/day{DD}.txt` input files
    #[arg(long, default_value = "./inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, or day
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Print visualization payloads after the answers
    #[arg(long)]
    pub visualize: bool,

    /// Quiet mode - only output answers
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log parse and solve timings to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["puzzle"]).unwrap();
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert_eq!(args.input_dir, PathBuf::from("./inputs"));
        assert!(args.tags.is_empty());
        assert!(!args.visualize);
    }

    #[test]
    fn test_input_requires_day() {
        assert!(Args::try_parse_from(["puzzle", "--input", "-"]).is_err());
        let args = Args::try_parse_from(["puzzle", "--day", "5", "--input", "-"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_tags_and_day_range() {
        let args = Args::try_parse_from(["puzzle", "-t", "grid,simulation"]).unwrap();
        assert_eq!(args.tags, vec!["grid", "simulation"]);
        assert!(Args::try_parse_from(["puzzle", "--day", "26"]).is_err());
    }
}
