//! Puzzle Solver Library
//!
//! A type-safe framework for daily puzzle solvers. Each puzzle is a solver
//! with its own input parser, pure part solvers, and optional traces and
//! visualization payloads for a display to play back.
//!
//! # Overview
//!
//! This library provides:
//! - A trait-based interface for defining solvers
//! - [`Answer`] values (numbers or text)
//! - Replayable [`Trace`]s and plain-data [`Visualization`] payloads
//! - A registry for looking solvers up by year and day
//! - A host ([`run_day`]) that times a compute pass and turns failures into warnings
//!
//! # Quick Example
//!
//! ```
//! use puzzle_solver::{Answer, AocParser, ParseError, RegistryBuilder, SolveError, Solver, register_solver, run_day};
//!
//! pub struct MyDay1;
//!
//! impl AocParser for MyDay1 {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Vec<i32>, ParseError> {
//!         input.lines()
//!             .map(|line| line.trim().parse().map_err(|_|
//!                 ParseError::InvalidFormat("Expected integer".to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl Solver for MyDay1 {
//!     const PARTS: u8 = 2;
//!
//!     fn solve_part(parsed: &Vec<i32>, part: u8) -> Result<Answer, SolveError> {
//!         match part {
//!             1 => Ok(parsed.iter().sum::<i32>().into()),
//!             2 => Ok(parsed.iter().product::<i32>().into()),
//!             _ => Err(SolveError::PartNotImplemented(part)),
//!         }
//!     }
//! }
//!
//! let mut builder = RegistryBuilder::new();
//! register_solver!(builder, MyDay1, 2022, 1);
//! let registry = builder.build();
//!
//! let output = run_day(&registry, 2022, 1, "1\n2\n3");
//! assert_eq!(output.part1, Some(Answer::Number(6)));
//! assert_eq!(output.part2, Some(Answer::Number(6)));
//! assert!(output.warning.is_empty());
//!
//! let output = run_day(&registry, 2022, 1, "1\nx\n3");
//! assert_eq!(output.part1, None);
//! assert!(output.warning.contains("Expected integer"));
//! ```
//!
//! # Key Concepts
//!
//! ## Solver Trait
//!
//! [`AocParser`] defines the parsed representation, [`PartSolver<N>`] solves
//! one part from a shared reference to it, and [`Solver`] ties the parts
//! together. `#[derive(AocSolver)]` writes the [`Solver`] impl:
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2, visualize)]
//! #[aoc(year = 2022, day = 8, tags = ["grid"])]
//! pub struct Solver;
//! ```
//!
//! ## DynSolver Trait
//!
//! [`DynSolver`] erases the concrete solver type so the registry and host can
//! work with every day uniformly.
//!
//! ## Plugin System
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] to `inventory`;
//! [`RegistryBuilder::register_all_plugins`] picks them all up.

mod answer;
mod error;
mod host;
mod instance;
mod registry;
mod solver;
mod trace;
pub mod visual;

pub use answer::Answer;
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use host::{DayOutput, run_day};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, RegistryBuilder, SolverFactory, SolverPlugin, SolverRegistry,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt, TraceProducer, Visualizer};
pub use trace::Trace;
pub use visual::Visualization;

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};
