//! Result aggregator for ordering parallel solver outputs
//!
//! Buffers and orders outputs for streaming using two min-heaps:
//! - One for expected keys (what we're waiting for)
//! - One for received outputs (buffered until their turn)

use puzzle_solver::DayOutput;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Key for ordering outputs, ascending by year then day
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct DayKey {
    pub year: u16,
    pub day: u8,
}

impl From<&DayOutput> for DayKey {
    fn from(output: &DayOutput) -> Self {
        Self {
            year: output.year,
            day: output.day,
        }
    }
}

/// Min-heap entry ordered by [`DayKey`]
struct Pending(DayOutput);

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        DayKey::from(&other.0).cmp(&DayKey::from(&self.0))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        DayKey::from(&self.0) == DayKey::from(&other.0)
    }
}

/// Aggregator that buffers outputs and emits them in sorted order
pub struct OutputAggregator {
    expected: BinaryHeap<Reverse<DayKey>>,
    pending: BinaryHeap<Pending>,
}

impl OutputAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(expected_keys: impl IntoIterator<Item = DayKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add an output and return every output now ready, in order
    pub fn add(&mut self, output: DayOutput) -> Vec<DayOutput> {
        self.pending.push(Pending(output));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top)) =
            (self.expected.peek(), self.pending.peek())
        {
            if DayKey::from(&top.0) != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(Pending(output)) = self.pending.pop() {
                ready.push(output);
            }
        }
        ready
    }

    /// Drain remaining outputs in order
    pub fn drain(&mut self) -> Vec<DayOutput> {
        let mut outputs: Vec<_> = self.pending.drain().map(|p| p.0).collect();
        outputs.sort_by_key(|o| DayKey::from(o));
        outputs
    }

    /// Check if all expected outputs have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
