//! Rucksack reorganisation: shared items and group badges

use crate::utils::parse_lines;
use anyhow::bail;
use puzzle_solver::visual::{Segment, TextRow};
use puzzle_solver::{
    Answer, AocParser, ParseError, PartSolver, SolveError, Visualization, Visualizer,
};
use puzzle_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2, visualize)]
#[aoc(year = 2022, day = 3, tags = ["sets"])]
pub struct Solver;

const GROUP_SIZE: usize = 3;

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input.trim().lines(), |line| {
            let line = line.trim();
            if line.is_empty() {
                bail!("empty rucksack");
            }
            if let Some(c) = line.chars().find(|c| !c.is_ascii_alphabetic()) {
                bail!("unexpected item {c:?}");
            }
            Ok(line)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        let mut total = 0u64;
        for (idx, rucksack) in shared.iter().enumerate() {
            let item = shared_item(rucksack).ok_or_else(|| {
                SolveError::NoSolution(format!("rucksack {} has no shared item", idx + 1))
            })?;
            total += priority(item);
        }
        Ok(total.into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &Self::SharedData<'_>) -> Result<Answer, SolveError> {
        if shared.len() % GROUP_SIZE != 0 {
            return Err(SolveError::failed(format!(
                "{} rucksacks do not split into groups of {GROUP_SIZE}",
                shared.len()
            )));
        }

        let mut total = 0u64;
        for (idx, group) in shared.chunks_exact(GROUP_SIZE).enumerate() {
            let badge = badge(group).ok_or_else(|| {
                SolveError::NoSolution(format!("group {} has no common item", idx + 1))
            })?;
            total += priority(badge);
        }
        Ok(total.into())
    }
}

impl Visualizer for Solver {
    fn visualize(shared: &Self::SharedData<'_>) -> Result<Vec<Visualization>, SolveError> {
        let rows = shared
            .iter()
            .enumerate()
            .map(|(idx, rucksack)| {
                let start = idx - idx % GROUP_SIZE;
                let group = shared
                    .get(start..start + GROUP_SIZE)
                    .and_then(badge)
                    .map(|b| format!("Group {b}"));

                let (left, right) = compartments(rucksack);
                let mut segments = highlight(left, shared_item(rucksack));
                segments.push(Segment::plain(" "));
                segments.extend(highlight(right, shared_item(rucksack)));
                TextRow { group, segments }
            })
            .collect();
        Ok(vec![Visualization::Text(rows)])
    }
}

/// Split a rucksack in two; the first half takes the extra item of an odd count
pub fn compartments(rucksack: &str) -> (&str, &str) {
    rucksack.split_at(rucksack.len().div_ceil(2))
}

/// One bit per priority
fn item_set(items: &str) -> u64 {
    items.bytes().fold(0, |set, b| set | 1 << priority(b as char))
}

/// First item of `items`, in order, that is also in `set`
fn first_shared(items: &str, set: u64) -> Option<char> {
    let set = set & !1;
    items.chars().find(|&c| (set & (1 << priority(c))) != 0)
}

/// The item in both compartments; the first one in the left compartment if there are several
pub fn shared_item(rucksack: &str) -> Option<char> {
    let (left, right) = compartments(rucksack);
    first_shared(left, item_set(right))
}

/// The item common to every rucksack of the group, first in the first rucksack's order
pub fn badge(group: &[&str]) -> Option<char> {
    let (first, rest) = group.split_first()?;
    first_shared(first, rest.iter().fold(u64::MAX, |set, r| set & item_set(r)))
}

/// `a..=z` are 1 to 26, `A..=Z` are 27 to 52
pub fn priority(item: char) -> u64 {
    match item {
        'a'..='z' => item as u64 - 'a' as u64 + 1,
        'A'..='Z' => item as u64 - 'A' as u64 + 27,
        _ => 0,
    }
}

fn highlight(compartment: &str, item: Option<char>) -> Vec<Segment> {
    match item.and_then(|c| compartment.find(c)) {
        Some(at) => vec![
            Segment::plain(&compartment[..at]),
            Segment::emphasised(&compartment[at..=at]),
            Segment::plain(&compartment[at + 1..]),
        ],
        None => vec![Segment::plain(compartment)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_solver::Solver as _;

    const SAMPLE: &str = "\
vJrwpWtwJgWrhcsFMMfFFhFp
jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
PmmdzqPrVvPwwTWBwg
wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
ttgJtRGJQctTZtZT
CrZsJsPPZsGzwwsLwLmpwMDw
";

    #[test]
    fn test_sample() {
        let rucksacks = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&rucksacks, 1).unwrap(), 157);
        assert_eq!(Solver::solve_part(&rucksacks, 2).unwrap(), 70);
    }

    #[test]
    fn test_shared_items_and_badges() {
        let rucksacks = Solver::parse(SAMPLE).unwrap();
        let items: String = rucksacks.iter().filter_map(|r| shared_item(r)).collect();
        assert_eq!(items, "pLPvts");
        assert_eq!(badge(&rucksacks[..3]), Some('r'));
        assert_eq!(badge(&rucksacks[3..]), Some('Z'));
    }

    #[test]
    fn test_odd_length_first_half_is_longer() {
        assert_eq!(compartments("abcab"), ("abc", "ab"));
        assert_eq!(shared_item("abcab"), Some('a'));
    }

    #[test]
    fn test_several_shared_items_pick_the_first_on_the_left() {
        assert_eq!(shared_item("BaaB"), Some('B'));
        assert_eq!(badge(&["Bxa", "aBy", "zaB"]), Some('B'));
        assert_eq!(badge(&[]), None);

        let rucksacks = Solver::parse("BaaB").unwrap();
        assert_eq!(Solver::solve_part(&rucksacks, 1).unwrap(), 28);
    }

    #[test]
    fn test_priorities() {
        assert_eq!(priority('a'), 1);
        assert_eq!(priority('z'), 26);
        assert_eq!(priority('A'), 27);
        assert_eq!(priority('Z'), 52);
    }

    #[test]
    fn test_incomplete_group_fails_part_two_only() {
        let rucksacks = Solver::parse("abca\nxyzx\nabab\nqwqw").unwrap();
        assert_eq!(Solver::solve_part(&rucksacks, 1).unwrap(), 1 + 24 + 1 + 17);
        assert!(matches!(
            Solver::solve_part(&rucksacks, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_no_shared_item_is_an_error() {
        let rucksacks = Solver::parse("abcd").unwrap();
        assert!(matches!(
            Solver::solve_part(&rucksacks, 1),
            Err(SolveError::NoSolution(_))
        ));
    }

    #[test]
    fn test_rows_emphasise_the_shared_item() {
        let rucksacks = Solver::parse(SAMPLE).unwrap();
        let vis = <Solver as Visualizer>::visualize(&rucksacks).unwrap();
        let Visualization::Text(rows) = &vis[0] else {
            panic!("expected text, got {:?}", vis[0]);
        };
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].group.as_deref(), Some("Group r"));
        assert_eq!(rows[5].group.as_deref(), Some("Group Z"));
        let emphasised: Vec<&str> = rows[0]
            .segments
            .iter()
            .filter(|s| s.emphasis)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(emphasised, vec!["p", "p"]);
    }

    #[test]
    fn test_non_letters_are_rejected() {
        let err = Solver::parse("abc\nab1").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat("(line 2) unexpected item '1'".to_string())
        );
    }
}
