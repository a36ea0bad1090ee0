//! Treetop tree house: visibility and scenic scores on a height grid

use crate::utils::parse_lines;
use anyhow::anyhow;
use puzzle_solver::visual::{Grid, HeatCell};
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Visualization, Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 8, tags = ["grid"])]
pub struct Solver;

/// Row and column steps for north, south, east and west
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// A tree with what it sees in each direction, ordered as [`DIRECTIONS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tree {
    pub height: u8,
    /// Every tree between this one and the edge is strictly shorter
    pub clear: [bool; 4],
    /// Trees seen before the edge or the first tree at least as tall, inclusive
    pub view: [u32; 4],
}

impl Tree {
    pub fn visible(&self) -> bool {
        self.clear.iter().any(|&c| c)
    }

    pub fn scenic_score(&self) -> u64 {
        self.view.iter().map(|&v| u64::from(v)).product()
    }
}

fn look(heights: &Grid<u8>, row: usize, col: usize, (dr, dc): (isize, isize)) -> (bool, u32) {
    let Some(&height) = heights.get(row, col) else {
        return (true, 0);
    };
    let mut seen = 0;
    let (mut r, mut c) = (row, col);
    loop {
        let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
            return (true, seen);
        };
        let Some(&other) = heights.get(nr, nc) else {
            return (true, seen);
        };
        seen += 1;
        if other >= height {
            return (false, seen);
        }
        (r, c) = (nr, nc);
    }
}

pub fn survey(heights: &Grid<u8>) -> Grid<Tree> {
    Grid::from_fn(heights.height(), heights.width(), |row, col| {
        let mut tree = Tree {
            height: heights.get(row, col).copied().unwrap_or_default(),
            clear: [false; 4],
            view: [0; 4],
        };
        for (i, &direction) in DIRECTIONS.iter().enumerate() {
            (tree.clear[i], tree.view[i]) = look(heights, row, col, direction);
        }
        tree
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<Tree>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows = parse_lines(input.trim().lines(), |line| {
            line.trim()
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(|| anyhow!("expected a digit, got {c:?}"))
                })
                .collect::<anyhow::Result<Vec<u8>>>()
        })?;
        let heights = Grid::from_rows(rows)?;
        if heights.is_empty() {
            return Err(ParseError::MissingData("empty grid".to_string()));
        }
        Ok(survey(&heights))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(shared.iter().filter(|t| t.visible()).count().into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(shared
            .iter()
            .map(Tree::scenic_score)
            .max()
            .unwrap_or_default()
            .into())
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        Ok(vec![Visualization::Heatmap(shared.map(|t| HeatCell {
            value: t.height.into(),
            score: t.scenic_score(),
            highlighted: t.visible(),
        }))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use puzzle_solver::Solver as _;

    const SAMPLE: &str = "30373\n25512\n65332\n33549\n35390\n";

    #[test]
    fn test_sample() {
        let forest = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&forest, 1).unwrap(), 21);
        assert_eq!(Solver::solve_part(&forest, 2).unwrap(), 8);
    }

    #[test]
    fn test_view_distances() {
        let forest = Solver::parse(SAMPLE).unwrap();
        // The 5 in the middle of the second row
        let tree = forest.get(1, 2).unwrap();
        assert_eq!(tree.view, [1, 2, 2, 1]);
        assert_eq!(tree.scenic_score(), 4);
        // The 5 in the middle of the fourth row
        let tree = forest.get(3, 2).unwrap();
        assert_eq!(tree.view, [2, 1, 2, 2]);
        assert_eq!(tree.scenic_score(), 8);
    }

    #[test]
    fn test_edges_are_visible_with_zero_score() {
        let forest = Solver::parse(SAMPLE).unwrap();
        for (row, col) in [(0, 0), (0, 3), (4, 4), (2, 0)] {
            let tree = forest.get(row, col).unwrap();
            assert!(tree.visible(), "({row}, {col})");
            assert_eq!(tree.scenic_score(), 0);
        }
    }

    #[test]
    fn test_ragged_grid_is_rejected() {
        assert_eq!(
            Solver::parse("123\n12").unwrap_err(),
            ParseError::InvalidFormat("row 2 has 2 cells, expected 3".to_string())
        );
        assert_eq!(
            Solver::parse("123\n1a3").unwrap_err(),
            ParseError::InvalidFormat("(line 2) expected a digit, got 'a'".to_string())
        );
    }

    #[test]
    fn test_heatmap_marks_visible_trees() {
        let forest = Solver::parse(SAMPLE).unwrap();
        let vis = <Solver as Visualizer>::visualize(&forest).unwrap();
        let Visualization::Heatmap(cells) = &vis[0] else {
            panic!("expected heatmap");
        };
        assert_eq!(cells.iter().filter(|c| c.highlighted).count(), 21);
        assert_eq!(
            cells.get(3, 2),
            Some(&HeatCell {
                value: 5,
                score: 8,
                highlighted: true
            })
        );
    }

    proptest! {
        #[test]
        fn prop_border_is_always_visible(rows in prop::collection::vec("[0-9]{5}", 1..6)) {
            let forest = Solver::parse(&rows.join("\n")).unwrap();
            let (h, w) = (forest.height(), forest.width());
            for row in 0..h {
                for col in 0..w {
                    if row == 0 || col == 0 || row == h - 1 || col == w - 1 {
                        prop_assert!(forest.get(row, col).unwrap().visible());
                    }
                }
            }
        }
    }
}
