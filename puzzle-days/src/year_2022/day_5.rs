//! Supply stacks: crane simulation over a drawing of crate stacks

use crate::utils::{at_line, invalid_format};
use anyhow::{Context, anyhow, bail};
use puzzle_solver::visual::Snapshot;
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Trace, TraceProducer, Visualization,
    Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 5, tags = ["simulation", "stacks"])]
pub struct Solver;

const MOVE_PATTERN: &str = r"^move (\d+) from (\d+) to (\d+)$";

/// Stack contents, bottom crate first
pub type Stacks = Vec<Vec<char>>;

/// One instruction, stacks addressed by position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub count: usize,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    /// Label printed under each stack
    pub labels: Vec<usize>,
    pub stacks: Stacks,
    pub moves: Vec<Move>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraneModel {
    /// Moves crates one at a time
    CrateMover9000,
    /// Moves a block of crates at once
    CrateMover9001,
}

impl CraneModel {
    pub fn name(self) -> &'static str {
        match self {
            CraneModel::CrateMover9000 => "CrateMover 9000",
            CraneModel::CrateMover9001 => "CrateMover 9001",
        }
    }
}

/// The stacks after each instruction, for both crane models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraneStates {
    pub crate_mover_9000: Stacks,
    pub crate_mover_9001: Stacks,
}

impl AocParser for Solver {
    type SharedData<'a> = Procedure;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Skip whole blank lines only; the first drawing row keeps its indentation
        let all_lines: Vec<&str> = input.trim_end().lines().collect();
        let start = all_lines
            .iter()
            .position(|l| !l.trim().is_empty())
            .unwrap_or(all_lines.len());
        let lines = &all_lines[start..];
        let split = lines
            .iter()
            .position(|l| l.trim().is_empty())
            .unwrap_or(lines.len());
        let (drawing, instructions) = lines.split_at(split);

        let (label_line, rows) = drawing
            .split_last()
            .ok_or_else(|| ParseError::MissingData("stack drawing".to_string()))?;
        let (labels, columns) =
            parse_labels(label_line).map_err(|e| invalid_format(at_line(start + split - 1, e)))?;

        let mut stacks: Stacks = vec![Vec::new(); labels.len()];
        for (idx, row) in rows.iter().enumerate().rev() {
            let bytes = row.as_bytes();
            for (stack, &col) in stacks.iter_mut().zip(&columns) {
                match bytes.get(col) {
                    None | Some(b' ') => {}
                    Some(&b) if b.is_ascii_alphanumeric() => stack.push(b as char),
                    Some(&b) => {
                        return Err(invalid_format(at_line(
                            start + idx,
                            anyhow!("unexpected {:?} in stack drawing", b as char),
                        )));
                    }
                }
            }
        }

        let move_re = Regex::new(MOVE_PATTERN).map_err(|e| ParseError::Other(e.to_string()))?;
        let moves = instructions
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_move(&move_re, line.trim(), &labels).map_err(|e| at_line(start + split + idx, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(invalid_format)?;

        for (stack, label) in stacks.iter().zip(&labels) {
            tracing::trace!(label, height = stack.len(), "parsed stack");
        }
        Ok(Procedure {
            labels,
            stacks,
            moves,
        })
    }
}

/// Stack labels and the column each one sits in
fn parse_labels(line: &str) -> anyhow::Result<(Vec<usize>, Vec<usize>)> {
    let mut labels = Vec::new();
    let mut columns = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
        let token_len = rest[start..]
            .find(char::is_whitespace)
            .unwrap_or(rest.len() - start);
        let token = &rest[start..start + token_len];
        let label: usize = token
            .parse()
            .with_context(|| format!("expected a stack label, got {token:?}"))?;
        if labels.contains(&label) {
            bail!("stack label {label} appears twice");
        }
        labels.push(label);
        columns.push(line.len() - rest.len() + start);
        rest = &rest[start + token_len..];
    }
    if labels.is_empty() {
        bail!("missing stack labels");
    }
    Ok((labels, columns))
}

fn parse_move(move_re: &Regex, line: &str, labels: &[usize]) -> anyhow::Result<Move> {
    let caps = move_re
        .captures(line)
        .ok_or_else(|| anyhow!("expected \"move N from A to B\", got {line:?}"))?;
    let number = |i: usize| {
        caps[i]
            .parse::<usize>()
            .with_context(|| format!("number too large: {}", &caps[i]))
    };
    let stack = |label: usize| {
        labels
            .iter()
            .position(|&l| l == label)
            .ok_or_else(|| anyhow!("unknown stack {label}"))
    };
    Ok(Move {
        count: number(1)?,
        from: stack(number(2)?)?,
        to: stack(number(3)?)?,
    })
}

fn apply(
    stacks: &mut Stacks,
    labels: &[usize],
    mv: &Move,
    model: CraneModel,
) -> Result<(), SolveError> {
    let source = &mut stacks[mv.from];
    let Some(keep) = source.len().checked_sub(mv.count) else {
        return Err(SolveError::failed(format!(
            "cannot move {} crates from stack {} holding {}",
            mv.count,
            labels[mv.from],
            source.len()
        )));
    };
    let mut lifted = source.split_off(keep);
    if model == CraneModel::CrateMover9000 {
        lifted.reverse();
    }
    stacks[mv.to].extend(lifted);
    Ok(())
}

/// Every stack state from the drawing through the last instruction
pub fn simulate(procedure: &Procedure, model: CraneModel) -> Result<Trace<Stacks>, SolveError> {
    let mut stacks = procedure.stacks.clone();
    let mut trace = Trace::with_capacity(stacks.clone(), procedure.moves.len() + 1);
    for mv in &procedure.moves {
        apply(&mut stacks, &procedure.labels, mv, model)?;
        trace.push(stacks.clone());
    }
    Ok(trace)
}

/// Top crate of each stack; empty stacks contribute nothing
pub fn top_crates(stacks: &Stacks) -> String {
    stacks.iter().filter_map(|s| s.last()).collect()
}

fn final_tops(procedure: &Procedure, model: CraneModel) -> Result<Answer, SolveError> {
    let trace = simulate(procedure, model)?;
    Ok(trace.last().map(top_crates).unwrap_or_default().into())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        final_tops(shared, CraneModel::CrateMover9000)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        final_tops(shared, CraneModel::CrateMover9001)
    }
}

impl TraceProducer for Solver {
    type State = CraneStates;

    fn trace(shared: &Self::SharedData<'_>) -> Result<Trace<Self::State>, SolveError> {
        let single = simulate(shared, CraneModel::CrateMover9000)?;
        let block = simulate(shared, CraneModel::CrateMover9001)?;
        Ok(single
            .iter()
            .zip(&block)
            .map(|(a, b)| CraneStates {
                crate_mover_9000: a.clone(),
                crate_mover_9001: b.clone(),
            })
            .collect())
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        let trace = <Self as TraceProducer>::trace(shared)?;
        Ok(vec![
            Visualization::Animation {
                title: CraneModel::CrateMover9000.name().to_string(),
                frames: trace.map(|s| Snapshot::Stacks(s.crate_mover_9000.clone())),
            },
            Visualization::Animation {
                title: CraneModel::CrateMover9001.name().to_string(),
                frames: trace.map(|s| Snapshot::Stacks(s.crate_mover_9001.clone())),
            },
        ])
    }
}
