//! Rock paper scissors strategy guide

use crate::utils::parse_lines;
use anyhow::{anyhow, bail};
use puzzle_solver::{Answer, AocParser, ParseError, PartSolver, SolveError};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["scoring"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock,
    Paper,
    Scissors,
}

impl Shape {
    const ALL: [Shape; 3] = [Shape::Rock, Shape::Paper, Shape::Scissors];

    fn index(self) -> usize {
        self as usize
    }

    /// The shape this one beats
    fn beats(self) -> Shape {
        Self::ALL[(self.index() + 2) % 3]
    }

    /// The shape that beats this one
    fn loses_to(self) -> Shape {
        Self::ALL[(self.index() + 1) % 3]
    }

    fn score(self) -> u64 {
        self.index() as u64 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    fn of(ours: Shape, theirs: Shape) -> Outcome {
        if ours == theirs {
            Outcome::Draw
        } else if ours.beats() == theirs {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    fn score(self) -> u64 {
        match self {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }
}

/// One round: the opponent's shape and the second column, `X`, `Y` or `Z` as 0..3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub theirs: Shape,
    pub column: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input.trim().lines(), |line| {
            let (theirs, ours) = line
                .trim()
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected two columns, got {line:?}"))?;
            let theirs = match theirs {
                "A" => Shape::Rock,
                "B" => Shape::Paper,
                "C" => Shape::Scissors,
                other => bail!("unknown opponent shape {other:?}"),
            };
            let column = match ours.trim() {
                "X" => 0,
                "Y" => 1,
                "Z" => 2,
                other => bail!("unknown second column {other:?}"),
            };
            Ok(Round { theirs, column })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(shared.iter().map(score_as_shape).sum::<u64>().into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(shared.iter().map(score_as_outcome).sum::<u64>().into())
    }
}

/// The second column is the shape we play
fn score_as_shape(round: &Round) -> u64 {
    let ours = Shape::ALL[round.column];
    ours.score() + Outcome::of(ours, round.theirs).score()
}

/// The second column is the outcome we need
fn score_as_outcome(round: &Round) -> u64 {
    let outcome = [Outcome::Loss, Outcome::Draw, Outcome::Win][round.column];
    shape_for(round.theirs, outcome).score() + outcome.score()
}

fn shape_for(theirs: Shape, outcome: Outcome) -> Shape {
    match outcome {
        Outcome::Loss => theirs.beats(),
        Outcome::Draw => theirs,
        Outcome::Win => theirs.loses_to(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_solver::Solver as _;

    const SAMPLE: &str = "A Y\nB X\nC Z\n";

    #[test]
    fn test_sample() {
        let rounds = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&rounds, 1).unwrap(), 15);
        assert_eq!(Solver::solve_part(&rounds, 2).unwrap(), 12);
    }

    #[test]
    fn test_required_outcome_is_met() {
        for theirs in Shape::ALL {
            for outcome in [Outcome::Loss, Outcome::Draw, Outcome::Win] {
                assert_eq!(Outcome::of(shape_for(theirs, outcome), theirs), outcome);
            }
        }
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let err = Solver::parse("A Y\nD X").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat("(line 2) unknown opponent shape \"D\"".to_string())
        );
    }
}
