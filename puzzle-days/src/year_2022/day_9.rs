//! Rope bridge: knots following a moving head

use crate::utils::parse_lines;
use anyhow::{Context, anyhow, bail};
use puzzle_solver::visual::{Point, Snapshot};
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Trace, TraceProducer, Visualization,
    Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 9, tags = ["simulation", "grid"])]
pub struct Solver;

const SHORT_ROPE: usize = 2;
const LONG_ROPE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn step(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub direction: Direction,
    pub steps: u32,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Motion>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input.trim().lines(), |line| {
            let (direction, steps) = line
                .trim()
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected a direction and a distance"))?;
            let direction = match direction {
                "U" => Direction::Up,
                "D" => Direction::Down,
                "L" => Direction::Left,
                "R" => Direction::Right,
                other => bail!("unknown direction {other:?}"),
            };
            let steps = steps
                .trim()
                .parse::<u32>()
                .with_context(|| format!("bad distance {steps:?}"))?;
            Ok(Motion { direction, steps })
        })
    }
}

/// Where `follower` ends up after its leader has moved
pub fn follow(leader: Point, follower: Point) -> Point {
    let (dx, dy) = (leader.x - follower.x, leader.y - follower.y);
    if dx != 0 && dy != 0 && dx.abs() + dy.abs() > 2 {
        Point::new(follower.x + dx.signum(), follower.y + dy.signum())
    } else if dx.abs() > 1 {
        Point::new(follower.x + dx.signum(), follower.y)
    } else if dy.abs() > 1 {
        Point::new(follower.x, follower.y + dy.signum())
    } else {
        follower
    }
}

/// A rope of fixed length, knot 0 being the head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rope {
    knots: Vec<Point>,
}

impl Rope {
    pub fn new(length: usize) -> Result<Self, SolveError> {
        if length == 0 {
            return Err(SolveError::failed("a rope needs at least one knot"));
        }
        Ok(Self {
            knots: vec![Point::ORIGIN; length],
        })
    }

    pub fn knots(&self) -> &[Point] {
        &self.knots
    }

    pub fn tail(&self) -> Point {
        self.knots[self.knots.len() - 1]
    }

    /// Move the head one unit and let every knot behind it react in turn
    pub fn step(&mut self, direction: Direction) -> Result<(), SolveError> {
        let (dx, dy) = direction.step();
        let head = self.knots[0];
        self.knots[0] = head
            .x
            .checked_add(dx)
            .zip(head.y.checked_add(dy))
            .map(|(x, y)| Point::new(x, y))
            .ok_or_else(|| SolveError::failed(format!("head moves off the plane from {head}")))?;
        for i in 1..self.knots.len() {
            self.knots[i] = follow(self.knots[i - 1], self.knots[i]);
        }
        Ok(())
    }
}

fn unit_steps(motions: &[Motion]) -> impl Iterator<Item = Direction> + '_ {
    motions
        .iter()
        .flat_map(|m| std::iter::repeat_n(m.direction, m.steps as usize))
}

/// Distinct positions of the last knot, the start included
pub fn tail_visits(motions: &[Motion], length: usize) -> Result<usize, SolveError> {
    let mut rope = Rope::new(length)?;
    let mut visited = HashSet::from([rope.tail()]);
    for direction in unit_steps(motions) {
        rope.step(direction)?;
        visited.insert(rope.tail());
    }
    Ok(visited.len())
}

/// Every knot position, before the first step and after each unit step of the head
pub fn rope_trace(motions: &[Motion], length: usize) -> Result<Trace<Vec<Point>>, SolveError> {
    let mut rope = Rope::new(length)?;
    let mut trace = Trace::new(rope.knots().to_vec());
    for direction in unit_steps(motions) {
        rope.step(direction)?;
        trace.push(rope.knots().to_vec());
    }
    Ok(trace)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(tail_visits(shared, SHORT_ROPE)?.into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(tail_visits(shared, LONG_ROPE)?.into())
    }
}

impl TraceProducer for Solver {
    type State = Vec<Point>;

    fn trace(shared: &Self::SharedData<'_>) -> Result<Trace<Self::State>, SolveError> {
        rope_trace(shared, LONG_ROPE)
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        let trace = <Self as TraceProducer>::trace(shared)?;
        Ok(vec![Visualization::Animation {
            title: "Rope".to_string(),
            frames: trace.map(|knots| Snapshot::Knots(knots.clone())),
        }])
    }
}
