//! Helpers shared by the day modules

pub mod math;

use anyhow::anyhow;
use puzzle_solver::ParseError;

/// Parse each line with `parse_line`, stopping at the first failure
///
/// Failures are prefixed with the 1-based line number, `(line N) ...`.
pub fn parse_lines<'a, T>(
    lines: impl IntoIterator<Item = &'a str>,
    mut parse_line: impl FnMut(&'a str) -> anyhow::Result<T>,
) -> Result<Vec<T>, ParseError> {
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| parse_line(line).map_err(|e| at_line(idx, e)))
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(invalid_format)
}

/// Prefix an error with the 1-based number of the 0-based line `idx`
pub fn at_line(idx: usize, e: anyhow::Error) -> anyhow::Error {
    anyhow!("(line {}) {}", idx + 1, e)
}

pub fn invalid_format(e: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn test_line_numbers_are_one_based() {
        let err = parse_lines("1\n2\nx".lines(), |l| match l.parse::<u8>() {
            Ok(v) => Ok(v),
            Err(_) => bail!("not a number: {l}"),
        })
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat("(line 3) not a number: x".to_string())
        );
    }

    #[test]
    fn test_all_lines_parsed_in_order() {
        let parsed = parse_lines("3\n1\n2".lines(), |l| Ok(l.parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![3, 1, 2]);
    }
}
