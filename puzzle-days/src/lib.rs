//! Puzzle solvers with automatic registration
//!
//! Each day is a unit struct named `Solver` in its own module, wired up with
//! the `AocSolver` and `AutoRegisterSolver` derives. Linking this crate is
//! enough for `RegistryBuilder::register_all_plugins` to find every day.

pub mod utils;

#[cfg(feature = "year-2022")]
pub mod year_2022;
