//! Segment - a run of constant state within a series.

use chrono::{DateTime, Utc};

use crate::{Series, State};

/// A run of a series where the state is constant across
/// `[start_index, stop_index)`.
///
/// Indices refer to positions in the series the segment was extracted
/// from; a segment means nothing on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<S = Option<State>> {
    /// First position covered by the segment.
    pub start_index: usize,

    /// Position where the segment was closed (exclusive).
    pub stop_index: usize,

    /// State held throughout the segment.
    pub state: S,
}

impl<S> Segment<S> {
    /// Create a new segment.
    pub const fn new(start_index: usize, stop_index: usize, state: S) -> Self {
        Self {
            start_index,
            stop_index,
            state,
        }
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.stop_index.saturating_sub(self.start_index)
    }

    /// Check if the segment covers no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamps at the segment's start and stop positions.
    ///
    /// Returns `None` if either index falls outside `series`.
    pub fn time_span(&self, series: &Series) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = series.get(self.start_index)?.timestamp;
        let stop = series.get(self.stop_index)?.timestamp;
        Some((start, stop))
    }
}
