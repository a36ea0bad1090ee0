//! Calorie counting: top-K sums over blank-line separated groups

use crate::utils::{at_line, invalid_format};
use anyhow::Context;
use itertools::Itertools;
use puzzle_solver::visual::{Chart, ChartValue, Series};
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Visualization, Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 1, tags = ["aggregation"])]
pub struct Solver;

/// Calorie values, one group per elf
pub type Groups = Vec<Vec<u64>>;

impl AocParser for Solver {
    type SharedData<'a> = Groups;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut groups = Vec::new();
        let mut current = Vec::new();
        for (idx, line) in input.trim().lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                if !current.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
                continue;
            }
            let calories = line
                .parse::<u64>()
                .with_context(|| format!("expected a calorie count, got {line:?}"))
                .map_err(|e| invalid_format(at_line(idx, e)))?;
            current.push(calories);
        }
        if !current.is_empty() {
            groups.push(current);
        }

        if groups.is_empty() {
            return Err(ParseError::MissingData("no calorie groups".to_string()));
        }
        Ok(groups)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(top_k_sum(&group_sums(shared)?, 1)?.into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(top_k_sum(&group_sums(shared)?, 3)?.into())
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        let sums = group_sums(shared)?;
        let values = sums
            .iter()
            .map(|&sum| {
                i64::try_from(sum)
                    .map(ChartValue::Value)
                    .map_err(|_| SolveError::failed("calorie total too large to chart"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vec![Visualization::Chart(Chart {
            title: "Calories".to_string(),
            labels: (1..=sums.len()).map(|i| format!("Elf {i}")).collect(),
            series: vec![Series {
                label: "Calories".to_string(),
                values,
            }],
        })])
    }
}

pub fn group_sums(groups: &[Vec<u64>]) -> Result<Vec<u64>, SolveError> {
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            checked_sum(group.iter().copied())
                .ok_or_else(|| SolveError::failed(format!("calories of elf {} overflow", i + 1)))
        })
        .collect()
}

/// Sum of the `k` largest values; all of them when there are fewer than `k`
pub fn top_k_sum(sums: &[u64], k: usize) -> Result<u64, SolveError> {
    checked_sum(sums.iter().copied().sorted_unstable().rev().take(k))
        .ok_or_else(|| SolveError::failed(format!("sum of the top {k} calorie totals overflows")))
}

fn checked_sum(mut values: impl Iterator<Item = u64>) -> Option<u64> {
    values.try_fold(0u64, |acc, value| acc.checked_add(value))
}
