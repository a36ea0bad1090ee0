//! Answer values produced by part solvers

use std::fmt;

/// The result of solving one part: either a number or a piece of text
///
/// Numbers are stored as `i128` so every primitive integer converts losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Answer {
    Number(i128),
    Text(String),
}

impl Answer {
    /// Numeric value, if this answer is a number
    pub fn as_number(&self) -> Option<i128> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Text(_) => None,
        }
    }

    /// Text value, if this answer is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Number(_) => None,
            Answer::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(n) => write!(f, "{n}"),
            Answer::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! answer_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Answer {
                fn from(value: $t) -> Self {
                    Answer::Number(value as i128)
                }
            }
        )*
    };
}

answer_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, i128);

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_owned())
    }
}

impl PartialEq<i128> for Answer {
    fn eq(&self, other: &i128) -> bool {
        self.as_number() == Some(*other)
    }
}

impl PartialEq<&str> for Answer {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}
