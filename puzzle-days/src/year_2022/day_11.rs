//! Monkey in the middle: item passing with worry relief

use crate::utils::math::lcm;
use crate::utils::{at_line, invalid_format};
use anyhow::{Context, anyhow, bail, ensure};
use itertools::Itertools;
use puzzle_solver::visual::{Chart, ChartValue, Series};
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Visualization, Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 11, tags = ["simulation", "modular"])]
pub struct Solver;

const CALM_ROUNDS: usize = 20;
const CALM_RELIEF: u64 = 3;
const WORRIED_ROUNDS: usize = 10_000;

const OPERATION_PATTERN: &str = r"^Operation: new = old ([+*]) (old|\d+)$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Old,
    Value(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(Operand),
    Multiply(Operand),
}

impl Operation {
    /// New worry level, `None` on overflow
    pub fn apply(self, old: u64) -> Option<u64> {
        let value = |operand| match operand {
            Operand::Old => old,
            Operand::Value(v) => v,
        };
        match self {
            Operation::Add(operand) => old.checked_add(value(operand)),
            Operation::Multiply(operand) => old.checked_mul(value(operand)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey {
    pub items: Vec<u64>,
    pub operation: Operation,
    pub divisor: u64,
    pub if_true: usize,
    pub if_false: usize,
}

impl Monkey {
    fn target(&self, worry: u64) -> usize {
        if worry % self.divisor == 0 {
            self.if_true
        } else {
            self.if_false
        }
    }
}

/// What happens to a worry level after each inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relief {
    DivideBy(u64),
    Modulo(u64),
}

impl Relief {
    fn apply(self, worry: u64) -> u64 {
        match self {
            Relief::DivideBy(d) => worry / d,
            Relief::Modulo(m) => worry % m,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let operation_re =
            Regex::new(OPERATION_PATTERN).map_err(|e| ParseError::Other(e.to_string()))?;

        let lines: Vec<(usize, &str)> = input
            .trim()
            .lines()
            .map(str::trim)
            .enumerate()
            .collect();
        let blocks = lines
            .split(|(_, line)| line.is_empty())
            .filter(|block| !block.is_empty());

        let mut monkeys = Vec::new();
        for block in blocks {
            let monkey = parse_monkey(&operation_re, monkeys.len(), block)?;
            monkeys.push(monkey);
        }
        if monkeys.is_empty() {
            return Err(ParseError::MissingData("no monkeys".to_string()));
        }

        for (id, monkey) in monkeys.iter().enumerate() {
            for target in [monkey.if_true, monkey.if_false] {
                if target >= monkeys.len() {
                    return Err(ParseError::InvalidFormat(format!(
                        "monkey {id} throws to missing monkey {target}"
                    )));
                }
            }
        }
        Ok(monkeys)
    }
}

/// The `i`th line of a monkey block with `prefix` stripped
fn block_field<'a>(
    block: &[(usize, &'a str)],
    id: usize,
    i: usize,
    prefix: &str,
) -> Result<&'a str, ParseError> {
    let (line_idx, line) = block
        .get(i)
        .copied()
        .ok_or_else(|| ParseError::MissingData(format!("monkey {id} is missing {prefix:?}")))?;
    line.strip_prefix(prefix)
        .map(str::trim)
        .ok_or_else(|| invalid_format(at_line(line_idx, anyhow!("expected {prefix:?}"))))
}

fn parse_monkey(
    operation_re: &Regex,
    id: usize,
    block: &[(usize, &str)],
) -> Result<Monkey, ParseError> {
    let field = |i: usize, prefix: &str| block_field(block, id, i, prefix);
    let context = |i: usize, e: anyhow::Error| {
        let line_idx = block.get(i).map_or(0, |(idx, _)| *idx);
        invalid_format(at_line(line_idx, e))
    };

    let header = field(0, "Monkey")?;
    let declared = header
        .strip_suffix(':')
        .and_then(|n| n.trim().parse::<usize>().ok())
        .ok_or_else(|| context(0, anyhow!("bad monkey header")))?;
    if declared != id {
        return Err(context(0, anyhow!("expected monkey {id}, found monkey {declared}")));
    }

    let items = field(1, "Starting items:")?;
    let items = items
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u64>().with_context(|| format!("bad item {s:?}")))
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| context(1, e))?;

    let operation = parse_operation(operation_re, block.get(2).map_or("", |(_, l)| *l))
        .map_err(|e| context(2, e))?;

    let divisor = field(3, "Test: divisible by")?
        .parse::<u64>()
        .context("bad divisor")
        .and_then(|d| {
            ensure!(d > 0, "divisor must be positive");
            Ok(d)
        })
        .map_err(|e| context(3, e))?;

    let target = |i: usize, prefix: &str| -> Result<usize, ParseError> {
        let target = field(i, prefix)?
            .parse::<usize>()
            .context("bad monkey number")
            .and_then(|t| {
                ensure!(t != id, "monkey {id} cannot throw to itself");
                Ok(t)
            })
            .map_err(|e| context(i, e))?;
        Ok(target)
    };
    let if_true = target(4, "If true: throw to monkey")?;
    let if_false = target(5, "If false: throw to monkey")?;

    if block.len() > 6 {
        return Err(context(6, anyhow!("unexpected line after monkey {id}")));
    }

    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

fn parse_operation(operation_re: &Regex, line: &str) -> anyhow::Result<Operation> {
    let caps = operation_re
        .captures(line)
        .ok_or_else(|| anyhow!("expected \"Operation: new = old (+|*) (old|N)\", got {line:?}"))?;
    let operand = match &caps[2] {
        "old" => Operand::Old,
        n => Operand::Value(n.parse::<u64>().with_context(|| format!("bad operand {n:?}"))?),
    };
    match &caps[1] {
        "+" => Ok(Operation::Add(operand)),
        "*" => Ok(Operation::Multiply(operand)),
        other => bail!("unsupported operator {other:?}"),
    }
}

/// Items inspected by each monkey over `rounds` rounds
pub fn inspections(monkeys: &[Monkey], rounds: usize, relief: Relief) -> Result<Vec<u64>, SolveError> {
    let mut holding: Vec<Vec<u64>> = monkeys.iter().map(|m| m.items.clone()).collect();
    let mut counts = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for (id, monkey) in monkeys.iter().enumerate() {
            let items = std::mem::take(&mut holding[id]);
            counts[id] += items.len() as u64;
            for worry in items {
                let worry = monkey.operation.apply(worry).ok_or_else(|| {
                    SolveError::failed(format!("worry level overflowed at monkey {id}"))
                })?;
                let worry = relief.apply(worry);
                holding[monkey.target(worry)].push(worry);
            }
        }
    }
    Ok(counts)
}

/// Product of the two largest counts, or of whatever there is
pub fn monkey_business(counts: &[u64]) -> u64 {
    counts.iter().sorted_unstable().rev().take(2).product()
}

fn calm(monkeys: &[Monkey]) -> Result<Vec<u64>, SolveError> {
    inspections(monkeys, CALM_ROUNDS, Relief::DivideBy(CALM_RELIEF))
}

fn worried(monkeys: &[Monkey]) -> Result<Vec<u64>, SolveError> {
    let modulus = monkeys.iter().map(|m| m.divisor).fold(1, lcm);
    tracing::debug!(modulus, "reducing worry levels");
    inspections(monkeys, WORRIED_ROUNDS, Relief::Modulo(modulus))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(monkey_business(&calm(shared)?).into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(monkey_business(&worried(shared)?).into())
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        let bars = |counts: Vec<u64>| {
            counts
                .into_iter()
                .map(|c| i64::try_from(c).map(ChartValue::Value))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| SolveError::failed("inspection count too large to chart"))
        };
        Ok(vec![Visualization::Chart(Chart {
            title: "Inspections".to_string(),
            labels: (0..shared.len()).map(|i| format!("Monkey {i}")).collect(),
            series: vec![
                Series {
                    label: format!("{CALM_ROUNDS} rounds"),
                    values: bars(calm(shared)?)?,
                },
                Series {
                    label: format!("{WORRIED_ROUNDS} rounds"),
                    values: bars(worried(shared)?)?,
                },
            ],
        })])
    }
}
