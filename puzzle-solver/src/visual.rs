//! Visualization payloads handed to a display collaborator
//!
//! Everything here is plain data. Solvers describe what to show (chart
//! series, grids, animation frames, annotated text, tree listings); drawing
//! it is the job of whoever consumes a [`Visualization`].

use crate::error::ParseError;
use crate::trace::Trace;
use std::fmt;

/// A rectangular 2-D array stored row-major
///
/// Every row has the same length. Coordinates are `(row, col)`, 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from rows, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ParseError> {
        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ParseError::InvalidFormat(format!(
                    "row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
            cells.extend(row);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid by computing each cell from its `(row, col)`
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let cells = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.height && col < self.width {
            self.cells.get(row * self.width + col)
        } else {
            None
        }
    }

    /// Rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks() panics on 0, and an empty grid has no rows anyway
        self.cells.chunks(self.width.max(1))
    }

    /// All cells in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Render one character per cell, rows joined by newlines
    pub fn render(&self, mut glyph: impl FnMut(&T) -> char) -> String {
        self.rows()
            .map(|row| row.iter().map(&mut glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A 2-D integer position, `y` growing upwards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One bar of a chart: a plain value or a floating `[start, end]` range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartValue {
    Value(i64),
    Range(i64, i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub label: String,
    pub values: Vec<ChartValue>,
}

/// A bar chart; every series has one value per label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

/// A heatmap cell: raw value, derived score, and whether it is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatCell {
    pub value: u32,
    pub score: u64,
    pub highlighted: bool,
}

/// A run of text, optionally emphasised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasis: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: false,
        }
    }

    pub fn emphasised(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: true,
        }
    }
}

/// A line of annotated text, optionally under a group heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRow {
    pub group: Option<String>,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One line of a static tree listing, in depth-first order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

/// One animation frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Stack contents, bottom first
    Stacks(Vec<Vec<char>>),
    /// Knot positions, head first
    Knots(Vec<Point>),
}

/// A structured visualization payload
#[derive(Debug, Clone, PartialEq)]
pub enum Visualization {
    Chart(Chart),
    Heatmap(Grid<HeatCell>),
    Pixels(Grid<bool>),
    Animation { title: String, frames: Trace<Snapshot> },
    Text(Vec<TextRow>),
    Tree(Vec<TreeLine>),
}

impl Visualization {
    /// Short human-readable description, e.g. `animation "Rope" (12 frames)`
    pub fn summary(&self) -> String {
        match self {
            Visualization::Chart(chart) => format!(
                "chart \"{}\" ({} bars x {} series)",
                chart.title,
                chart.labels.len(),
                chart.series.len()
            ),
            Visualization::Heatmap(grid) => {
                format!("heatmap ({}x{})", grid.width(), grid.height())
            }
            Visualization::Pixels(grid) => format!("pixels ({}x{})", grid.width(), grid.height()),
            Visualization::Animation { title, frames } => {
                format!("animation \"{}\" ({} frames)", title, frames.len())
            }
            Visualization::Text(rows) => format!("text ({} rows)", rows.len()),
            Visualization::Tree(lines) => format!("tree ({} entries)", lines.len()),
        }
    }
}
