//! Tuning trouble: first window of pairwise distinct characters

use itertools::Itertools;
use puzzle_solver::{Answer, AocParser, ParseError, PartSolver, SolveError};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["sliding-window"])]
pub struct Solver;

const PACKET_MARKER: usize = 4;
const MESSAGE_MARKER: usize = 14;

impl AocParser for Solver {
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stream = input.trim();
        if stream.is_empty() {
            return Err(ParseError::MissingData("empty datastream".to_string()));
        }
        if let Some(c) = stream.chars().find(|c| c.is_whitespace()) {
            return Err(ParseError::InvalidFormat(format!(
                "datastream must be one line, found {c:?}"
            )));
        }
        Ok(stream)
    }
}

/// Characters consumed when the last `n` of them are first pairwise distinct
pub fn first_marker(stream: &str, n: usize) -> Result<usize, SolveError> {
    let chars: Vec<char> = stream.chars().collect();
    chars
        .windows(n)
        .position(|window| window.iter().all_unique())
        .map(|start| start + n)
        .ok_or_else(|| {
            SolveError::NoSolution(format!("could not find a unique string of length {n}"))
        })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(first_marker(shared, PACKET_MARKER)?.into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(first_marker(shared, MESSAGE_MARKER)?.into())
    }
}
