//! Run-length segmentation of the state signal.

use tracing::debug;

use trends_types::{Segment, Series};

use crate::error::{Result, TrendsError};

/// Split a series' state column into runs of constant state.
///
/// See [`segment_runs`] for the exact boundary rules.
pub fn segments(series: &Series) -> Result<Vec<Segment>> {
    segment_runs(&series.states())
}

/// Split a state sequence into runs of constant state.
///
/// Walking from position 1, a segment `[boundary, i)` is closed whenever the
/// state at `i` differs from the state at `i - 1`, or `i` is the last
/// position. Both conditions are checked independently, so the last position
/// always closes a segment but never opens one that gets emitted: for
/// `[1, 1, 2, 2, 2, 3]` the result is `[0, 2) = 1` and `[2, 5) = 2`, and the
/// trailing run of `3` is not reported. A single-element sequence yields no
/// segments.
///
/// States are compared with `==`, so a missing state (`None`) is a value of
/// its own: consecutive `None`s form one run rather than a boundary at every
/// null sample, as a NaN-based comparison would produce.
///
/// # Errors
///
/// Returns [`TrendsError::EmptySeries`] for an empty sequence.
pub fn segment_runs<S: PartialEq + Copy>(states: &[S]) -> Result<Vec<Segment<S>>> {
    let Some(&first) = states.first() else {
        return Err(TrendsError::EmptySeries);
    };

    let last = states.len() - 1;
    let mut segments = Vec::new();
    let (mut boundary, mut held) = (0, first);

    for i in 1..states.len() {
        if states[i] != states[i - 1] || i == last {
            segments.push(Segment::new(boundary, i, held));
            boundary = i;
            held = states[i];
        }
    }

    debug!(points = states.len(), segments = segments.len(), "segmented states");
    Ok(segments)
}
