//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::ExecutorError;
use crate::input::InputStore;
use itertools::Itertools;
use puzzle_solver::{DayOutput, SolverRegistry, run_day};
use rayon::prelude::*;
use std::sync::mpsc::Sender;

/// Work item representing one day to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
}

/// Parallel executor for running solvers
pub struct Executor {
    registry: SolverRegistry,
    inputs: InputStore,
    explicit_input: Option<String>,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            registry,
            inputs: InputStore::new(config.input_dir.clone()),
            explicit_input: config.explicit_input.clone(),
            parallelize_by: config.parallelize_by,
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata, in (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
            })
            .collect()
    }

    /// Execute all work items and send one output per item to the channel
    pub fn execute(&self, tx: Sender<DayOutput>) -> Result<(), ExecutorError> {
        let work_items = self.collect_work_items();

        match self.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .try_for_each(|work| self.run_item(work, &tx)),
            ParallelizeBy::Year => {
                // Days of one year stay on one worker, in order
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year.into_par_iter().try_for_each_with(tx, |tx, items| {
                        items.iter().try_for_each(|work| self.run_item(work, tx))
                    })
                })
            }
            ParallelizeBy::Day => self.thread_pool.install(|| {
                work_items
                    .into_par_iter()
                    .try_for_each_with(tx, |tx, work| self.run_item(&work, tx))
            }),
        }
    }

    /// Compute one day; a missing or unreadable input becomes the day's warning
    fn run_item(&self, work: &WorkItem, tx: &Sender<DayOutput>) -> Result<(), ExecutorError> {
        let output = match self.input_for(work) {
            Ok(input) => run_day(&self.registry, work.year, work.day, &input),
            Err(warning) => {
                tracing::warn!(year = work.year, day = work.day, %warning, "no input");
                DayOutput::failed(work.year, work.day, warning)
            }
        };
        tx.send(output).map_err(|_| ExecutorError::ChannelSend)
    }

    fn input_for(&self, work: &WorkItem) -> Result<String, String> {
        if let Some(input) = &self.explicit_input {
            return Ok(input.clone());
        }
        match self.inputs.get(work.year, work.day) {
            Ok(Some(input)) => Ok(input),
            Ok(None) => Err(format!(
                "No input file at {}",
                self.inputs.input_path(work.year, work.day).display()
            )),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;
    use puzzle_solver::{Answer, RegistryBuilder};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    // Link the day solvers
    use puzzle_days as _;

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let mut argv = vec!["puzzle", "--input-dir", dir.path().to_str().unwrap()];
        argv.extend_from_slice(extra);
        let config = Config::from_args(Args::try_parse_from(argv).unwrap()).unwrap();
        let registry = RegistryBuilder::new()
            .register_all_plugins()
            .unwrap()
            .build();
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<DayOutput> {
        let (tx, rx) = mpsc::channel();
        executor.execute(tx).unwrap();
        let mut outputs: Vec<_> = rx.into_iter().collect();
        outputs.sort_by_key(|o| (o.year, o.day));
        outputs
    }

    #[test]
    fn test_filters_select_work_items() {
        let dir = TempDir::new().unwrap();
        let items = executor(&dir, &["--year", "2022", "--day", "4"]).collect_work_items();
        assert_eq!(items, vec![WorkItem { year: 2022, day: 4 }]);

        let items = executor(&dir, &["--year", "2016"]).collect_work_items();
        assert!(items.is_empty());
    }

    #[test]
    fn test_missing_input_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let outputs = run(&executor(&dir, &["--day", "2"]));
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].warning.starts_with("No input file at"));
        assert!(outputs[0].warning.contains("day02.txt"));
        assert_eq!(outputs[0].part1, None);
    }

    #[test]
    fn test_every_mode_sends_one_output_per_day() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("2022")).unwrap();
        fs::write(dir.path().join("2022/day02.txt"), "A Y\nB X\nC Z\n").unwrap();

        for mode in ["sequential", "year", "day"] {
            let outputs = run(&executor(&dir, &["--parallelize-by", mode, "--threads", "2"]));
            assert_eq!(outputs.len(), 11, "{mode}");
            let day2 = &outputs[1];
            assert_eq!(day2.day, 2);
            assert_eq!(day2.part1, Some(Answer::Number(15)));
            assert_eq!(day2.part2, Some(Answer::Number(12)));
            assert!(outputs.iter().filter(|o| o.day != 2).all(|o| o.has_warning()));
        }
    }
}
