//! Camp cleanup: contained and overlapping section ranges

use crate::utils::parse_lines;
use anyhow::{Context, anyhow, ensure};
use puzzle_solver::visual::{Chart, ChartValue, Series};
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Visualization, Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 4, tags = ["intervals"])]
pub struct Solver;

/// Inclusive section range, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

pub type Pair = (Range, Range);

/// Either range fully contains the other
pub fn fully_contained((a, b): &Pair) -> bool {
    a.contains(b) || b.contains(a)
}

pub fn overlapping((a, b): &Pair) -> bool {
    a.overlaps(b)
}

fn parse_range(text: &str) -> anyhow::Result<Range> {
    let (start, end) = text
        .split_once('-')
        .ok_or_else(|| anyhow!("expected a range like 2-4, got {text:?}"))?;
    let start = start
        .trim()
        .parse::<u32>()
        .with_context(|| format!("bad range start {start:?}"))?;
    let end = end
        .trim()
        .parse::<u32>()
        .with_context(|| format!("bad range end {end:?}"))?;
    ensure!(start <= end, "range {text} runs backwards");
    Ok(Range { start, end })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pair>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input.trim().lines(), |line| {
            let (first, second) = line
                .trim()
                .split_once(',')
                .ok_or_else(|| anyhow!("expected two comma separated ranges"))?;
            Ok((parse_range(first)?, parse_range(second)?))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(shared.iter().filter(|p| fully_contained(p)).count().into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        Ok(shared.iter().filter(|p| overlapping(p)).count().into())
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        Ok(vec![
            range_chart("Full Overlaps", shared, fully_contained),
            range_chart("Partial Overlaps", shared, overlapping),
        ])
    }
}

/// Range bars for the pairs matching `keep`, labelled by their input position
fn range_chart(title: &str, pairs: &[Pair], keep: fn(&Pair) -> bool) -> Visualization {
    let kept: Vec<(usize, &Pair)> = pairs
        .iter()
        .enumerate()
        .filter(|(_, p)| keep(p))
        .collect();
    let bar = |r: &Range| ChartValue::Range(r.start.into(), r.end.into());

    Visualization::Chart(Chart {
        title: title.to_string(),
        labels: kept.iter().map(|(i, _)| format!("Pair {}", i + 1)).collect(),
        series: vec![
            Series {
                label: "First schedule".to_string(),
                values: kept.iter().map(|(_, (a, _))| bar(a)).collect(),
            },
            Series {
                label: "Second schedule".to_string(),
                values: kept.iter().map(|(_, (_, b))| bar(b)).collect(),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use puzzle_solver::Solver as _;

    const SAMPLE: &str = "2-4,6-8\n2-3,4-5\n5-7,7-9\n2-8,3-7\n6-6,4-6\n2-6,4-8\n";

    #[test]
    fn test_sample() {
        let pairs = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&pairs, 1).unwrap(), 2);
        assert_eq!(Solver::solve_part(&pairs, 2).unwrap(), 4);
    }

    #[test]
    fn test_charts_keep_matching_pairs() {
        let pairs = Solver::parse(SAMPLE).unwrap();
        let vis = <Solver as Visualizer>::visualize(&pairs).unwrap();
        let summaries: Vec<String> = vis.iter().map(Visualization::summary).collect();
        assert_eq!(
            summaries,
            vec![
                "chart \"Full Overlaps\" (2 bars x 2 series)",
                "chart \"Partial Overlaps\" (4 bars x 2 series)",
            ]
        );
        let Visualization::Chart(full) = &vis[0] else {
            panic!("expected chart");
        };
        assert_eq!(full.labels, vec!["Pair 4", "Pair 5"]);
        assert_eq!(full.series[1].values[0], ChartValue::Range(3, 7));
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            Solver::parse("2-4,6-8\n2-4").unwrap_err(),
            ParseError::InvalidFormat("(line 2) expected two comma separated ranges".to_string())
        );
        assert_eq!(
            Solver::parse("4-2,6-8").unwrap_err(),
            ParseError::InvalidFormat("(line 1) range 4-2 runs backwards".to_string())
        );
        assert!(Solver::parse("a-2,6-8").is_err());
    }

    fn range() -> impl Strategy<Value = Range> {
        (0u32..100, 0u32..100).prop_map(|(a, b)| Range {
            start: a.min(b),
            end: a.max(b),
        })
    }

    proptest! {
        #[test]
        fn prop_containment_implies_overlap(pair in (range(), range())) {
            if fully_contained(&pair) {
                prop_assert!(overlapping(&pair));
            }
        }

        #[test]
        fn prop_overlap_is_symmetric(a in range(), b in range()) {
            prop_assert_eq!(overlapping(&(a, b)), overlapping(&(b, a)));
        }
    }
}
