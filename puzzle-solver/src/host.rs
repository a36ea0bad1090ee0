//! Host boundary: turn one raw input into one output record
//!
//! The host owns everything impure about a compute pass: it measures elapsed
//! time around the pure parse/solve calls, and it turns any failure into a
//! warning string. Solvers themselves never see the clock and never decide
//! how errors are shown.

use crate::answer::Answer;
use crate::error::SolverError;
use crate::registry::SolverRegistry;
use crate::visual::Visualization;
use chrono::{TimeDelta, Utc};

/// Everything a display needs for one day after one compute pass
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutput {
    pub year: u16,
    pub day: u8,
    /// Absent until computed, and after any failure
    pub part1: Option<Answer>,
    pub part2: Option<Answer>,
    /// Parse plus solve time of the pass
    pub elapsed: Option<TimeDelta>,
    /// Empty when nothing went wrong
    pub warning: String,
    pub visualizations: Vec<Visualization>,
}

impl DayOutput {
    /// Nothing computed yet, nothing to warn about
    pub fn idle(year: u16, day: u8) -> Self {
        Self {
            year,
            day,
            part1: None,
            part2: None,
            elapsed: None,
            warning: String::new(),
            visualizations: Vec::new(),
        }
    }

    /// A pass that failed: only the warning is set
    pub fn failed(year: u16, day: u8, warning: impl Into<String>) -> Self {
        Self {
            warning: warning.into(),
            ..Self::idle(year, day)
        }
    }

    /// Elapsed time in fractional milliseconds
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed
            .and_then(|d| d.num_microseconds())
            .map(|micros| micros as f64 / 1000.0)
    }

    pub fn has_warning(&self) -> bool {
        !self.warning.is_empty()
    }

    /// Answer for part 1 or 2
    pub fn answer(&self, part: u8) -> Option<&Answer> {
        match part {
            1 => self.part1.as_ref(),
            2 => self.part2.as_ref(),
            _ => None,
        }
    }
}

/// Run one full compute pass for `year`/`day` over `input`
///
/// Blank input yields [`DayOutput::idle`]. A parse or solve failure yields
/// [`DayOutput::failed`] with the error message; answers from parts that did
/// succeed before the failure are discarded.
pub fn run_day(registry: &SolverRegistry, year: u16, day: u8, input: &str) -> DayOutput {
    if input.trim().is_empty() {
        return DayOutput::idle(year, day);
    }

    match compute(registry, year, day, input) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(year, day, error = %e, "compute pass failed");
            DayOutput::failed(year, day, e.to_string())
        }
    }
}

fn compute(
    registry: &SolverRegistry,
    year: u16,
    day: u8,
    input: &str,
) -> Result<DayOutput, SolverError> {
    let start = Utc::now();
    let solver = registry.create_solver(year, day, input)?;
    tracing::debug!(year, day, parse = %solver.parse_duration(), "parsed input");

    let mut answers = Vec::with_capacity(solver.parts() as usize);
    for part in 1..=solver.parts() {
        let result = solver.solve(part)?;
        tracing::debug!(year, day, part, solve = %result.duration(), "solved part");
        answers.push(result.answer);
    }
    let elapsed = Utc::now() - start;

    let visualizations = solver.visualize()?;

    let mut answers = answers.into_iter();
    Ok(DayOutput {
        year,
        day,
        part1: answers.next(),
        part2: answers.next(),
        elapsed: Some(elapsed),
        warning: String::new(),
        visualizations,
    })
}
