//! Core solver traits

use crate::answer::Answer;
use crate::error::{ParseError, SolveError};
use crate::trace::Trace;
use crate::visual::Visualization;

/// Trait for parsing puzzle input into shared data
///
/// This trait defines the shared data type and parsing logic for a solver,
/// providing clean separation between parsing and solving concerns.
///
/// # Example
///
/// ```
/// use puzzle_solver::{AocParser, ParseError};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
/// ```
pub trait AocParser {
    /// The parsed representation of one input.
    ///
    /// Use any ownership strategy:
    /// - `Vec<T>` or custom structs for owned data
    /// - `&'a str` for zero-copy borrowed data when no transformation is needed
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Trait for solving a specific part of a puzzle.
///
/// The const generic `N` represents the part number (1, 2, etc.).
/// Parts only get shared access to the parsed data, so one part can never
/// disturb what another part sees. A part that needs to mutate state clones
/// the piece it works on.
///
/// # Example
///
/// ```
/// use puzzle_solver::{Answer, AocParser, PartSolver, ParseError, SolveError};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Day1 {
///     fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
///         Ok(shared.iter().sum::<i32>().into())
///     }
/// }
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle.
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError>;
}

/// Produces the ordered sequence of intermediate states of a simulation.
///
/// The first frame is the initial state; each following frame is the state
/// after one discrete step.
pub trait TraceProducer: AocParser {
    type State;

    fn trace(shared: &Self::SharedData<'_>) -> Result<Trace<Self::State>, SolveError>;
}

/// Builds visualization payloads from parsed data.
///
/// Hooked into [`Solver::visualize`] by `#[aoc_solver(visualize)]`.
pub trait Visualizer: AocParser {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError>;
}

/// Core trait that all solvers must implement.
///
/// Extends `AocParser` to inherit `SharedData` type and `parse()` function.
/// Usually derived with `#[derive(AocSolver)]`, which dispatches each part to
/// the matching [`PartSolver`] impl.
///
/// # Example
///
/// ```
/// use puzzle_solver::{Answer, AocParser, ParseError, SolveError, Solver};
///
/// struct Day1Solver;
///
/// impl AocParser for Day1Solver {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input.lines()
///             .map(|line| line.parse().map_err(|_|
///                 ParseError::InvalidFormat("Expected integer".to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Day1Solver {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &Self::SharedData<'_>, part: u8) -> Result<Answer, SolveError> {
///         match part {
///             1 => Ok(shared.iter().sum::<i32>().into()),
///             2 => Ok(shared.iter().product::<i32>().into()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(Answer)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &Self::SharedData<'_>, part: u8) -> Result<Answer, SolveError>;

    /// Visualization payloads for this input; none unless overridden
    fn visualize(_shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        Ok(Vec::new())
    }
}

pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects parts outside `1..=PARTS` up front
    fn solve_part_checked_range(
        shared: &Self::SharedData<'_>,
        part: u8,
    ) -> Result<Answer, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
