//! Cathode-ray tube: register values per cycle and the CRT they draw

use crate::utils::parse_lines;
use anyhow::{Context, bail};
use puzzle_solver::visual::Grid;
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Visualization, Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 10, tags = ["simulation"])]
pub struct Solver;

const KEY_CYCLES: [usize; 6] = [20, 60, 100, 140, 180, 220];
const CRT_WIDTH: usize = 40;
const CRT_HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Noop,
    Addx(i64),
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input.trim().lines(), |line| {
            let mut words = line.split_whitespace();
            match (words.next(), words.next(), words.next()) {
                (Some("noop"), None, None) => Ok(Instruction::Noop),
                (Some("addx"), Some(value), None) => {
                    let value = value
                        .parse::<i64>()
                        .with_context(|| format!("bad addx operand {value:?}"))?;
                    Ok(Instruction::Addx(value))
                }
                _ => bail!("unknown instruction {:?}", line.trim()),
            }
        })
    }
}

/// Value of `X` during each cycle; index 0 is cycle 1
pub fn register_values(program: &[Instruction]) -> Result<Vec<i64>, SolveError> {
    let mut x: i64 = 1;
    let mut during = Vec::with_capacity(program.len() * 2);
    for instruction in program {
        match instruction {
            Instruction::Noop => during.push(x),
            Instruction::Addx(value) => {
                during.extend([x, x]);
                x = x.checked_add(*value).ok_or_else(|| {
                    SolveError::failed(format!(
                        "register overflows after cycle {}",
                        during.len()
                    ))
                })?;
            }
        }
    }
    Ok(during)
}

/// Sum of `cycle * X` over the key cycles the program reaches
pub fn signal_strength(during: &[i64]) -> Result<i64, SolveError> {
    KEY_CYCLES
        .iter()
        .filter_map(|&cycle| during.get(cycle - 1).map(|&x| (cycle, x)))
        .try_fold(0i64, |total, (cycle, x)| {
            (cycle as i64)
                .checked_mul(x)
                .and_then(|strength| total.checked_add(strength))
        })
        .ok_or_else(|| SolveError::failed("signal strength overflows"))
}

/// Lit pixels; cycles past the end of the program draw nothing
pub fn crt(during: &[i64]) -> Grid<bool> {
    Grid::from_fn(CRT_HEIGHT, CRT_WIDTH, |row, col| {
        during
            .get(row * CRT_WIDTH + col)
            .is_some_and(|&x| x.abs_diff(col as i64) <= 1)
    })
}

pub fn render(screen: &Grid<bool>) -> String {
    screen.render(|&lit| if lit { '#' } else { '.' })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(signal_strength(&register_values(shared)?)?.into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(render(&crt(&register_values(shared)?)).into())
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        Ok(vec![Visualization::Pixels(crt(&register_values(shared)?))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_solver::Solver as _;

    const OPENING: &str = "\
addx 15
addx -11
addx 6
addx -3
addx 5
addx -1
addx -8
addx 13
addx 4
noop
addx -1
";

    #[test]
    fn test_small_program() {
        let program = Solver::parse("noop\naddx 3\naddx -5").unwrap();
        assert_eq!(register_values(&program).unwrap(), vec![1, 1, 1, 4, 4]);
    }

    #[test]
    fn test_register_during_key_cycle() {
        let program = Solver::parse(OPENING).unwrap();
        let during = register_values(&program).unwrap();
        assert_eq!(during.len(), 21);
        assert_eq!(during[19], 21);
        assert_eq!(Solver::solve_part(&program, 1).unwrap(), 420);
    }

    #[test]
    fn test_crt_stops_with_the_program() {
        let program = Solver::parse(OPENING).unwrap();
        let answer = Solver::solve_part(&program, 2).unwrap();
        let rows: Vec<&str> = answer.as_text().unwrap().lines().collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], format!("##..##..##..##..##..#{}", ".".repeat(19)));
        assert!(rows[1..].iter().all(|r| *r == ".".repeat(40)));
    }

    #[test]
    fn test_idle_register_draws_a_column_band() {
        let program = vec![Instruction::Noop; 240];
        let screen = render(&crt(&register_values(&program).unwrap()));
        let expected = format!("###{}", ".".repeat(37));
        assert!(screen.lines().all(|row| row == expected));
        assert_eq!(screen.lines().count(), 6);
    }

    #[test]
    fn test_register_overflow_is_a_solve_error() {
        let program = Solver::parse("addx 9223372036854775807\n").unwrap();
        let err = Solver::solve_part(&program, 1).unwrap_err();
        assert_eq!(err.to_string(), "Solve failed: register overflows after cycle 2");
        assert!(Solver::solve_part(&program, 2).is_err());
    }

    #[test]
    fn test_signal_strength_overflow_is_a_solve_error() {
        let mut program = vec![Instruction::Addx(461168601842738790)];
        program.extend([Instruction::Noop; 18]);
        let during = register_values(&program).unwrap();
        assert_eq!(during.len(), 20);
        assert_eq!(
            signal_strength(&during).unwrap_err().to_string(),
            "Solve failed: signal strength overflows"
        );
    }

    #[test]
    fn test_pixels_visualization() {
        let program = Solver::parse(OPENING).unwrap();
        let vis = <Solver as Visualizer>::visualize(&program).unwrap();
        assert_eq!(vis[0].summary(), "pixels (40x6)");
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            Solver::parse("noop\nmul 3").unwrap_err(),
            ParseError::InvalidFormat("(line 2) unknown instruction \"mul 3\"".to_string())
        );
    }
}
