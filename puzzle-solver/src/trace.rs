//! Replayable simulation traces

use std::ops::Index;

/// An append-only, index-addressable sequence of simulation states
///
/// A trace is built once by a simulation run, frame by frame, and is then
/// only read. Playback can scrub to any frame with [`Trace::get`] or indexing;
/// recorded frames are never handed out mutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace<S> {
    frames: Vec<S>,
}

impl<S> Trace<S> {
    /// Start a trace with its initial state as frame 0
    pub fn new(initial: S) -> Self {
        Self {
            frames: vec![initial],
        }
    }

    /// Start a trace with room for `capacity` frames
    pub fn with_capacity(initial: S, capacity: usize) -> Self {
        let mut frames = Vec::with_capacity(capacity.max(1));
        frames.push(initial);
        Self { frames }
    }

    /// Record the next state
    pub fn push(&mut self, state: S) {
        self.frames.push(state);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<&S> {
        self.frames.get(index)
    }

    pub fn first(&self) -> Option<&S> {
        self.frames.first()
    }

    /// The final state of the simulation
    pub fn last(&self) -> Option<&S> {
        self.frames.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.frames
    }

    /// Convert every frame, keeping order and length
    pub fn map<T>(&self, f: impl FnMut(&S) -> T) -> Trace<T> {
        Trace {
            frames: self.frames.iter().map(f).collect(),
        }
    }
}

impl<S> Index<usize> for Trace<S> {
    type Output = S;

    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}

impl<S> From<Vec<S>> for Trace<S> {
    fn from(frames: Vec<S>) -> Self {
        Self { frames }
    }
}

impl<S> FromIterator<S> for Trace<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_is_index_addressable() {
        let mut trace = Trace::new(0);
        trace.push(1);
        trace.push(2);

        assert_eq!(trace.len(), 3);
        assert_eq!(trace[1], 1);
        assert_eq!(trace.get(2), Some(&2));
        assert_eq!(trace.get(3), None);
        assert_eq!(trace.first(), Some(&0));
        assert_eq!(trace.last(), Some(&2));
    }

    #[test]
    fn test_trace_can_be_replayed_repeatedly() {
        let trace: Trace<u8> = (0..5).collect();
        let forward: Vec<_> = trace.iter().copied().collect();
        let backward: Vec<_> = (0..trace.len()).rev().map(|i| trace[i]).collect();

        assert_eq!(forward, vec![0, 1, 2, 3, 4]);
        assert_eq!(backward, vec![4, 3, 2, 1, 0]);
        assert_eq!(trace.iter().count(), 5);
    }

    #[test]
    fn test_map_preserves_frame_count() {
        let trace = Trace::from(vec![1, 2, 3]);
        let doubled = trace.map(|n| n * 2);
        assert_eq!(doubled.as_slice(), &[2, 4, 6]);
    }
}
