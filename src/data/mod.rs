//! The analytics engine.
//!
//! This module turns raw Trends payloads into a normalized series and derives
//! descriptive statistics from it.
//!
//! ## Submodules
//!
//! - [`normalize`]: Schema-checked decoding of a payload into a [`Series`](trends_types::Series)
//! - [`segments`]: Run-length segmentation of the state signal
//! - [`transition`]: Markov transition matrix and expected dwell times
//! - [`stats`]: Per-state RTT distribution summaries
//! - [`duration`]: Parsing of window spans and human-readable periods
//!
//! ## Data Flow
//!
//! ```text
//! TrendsResponse (raw JSON)
//!        │
//!        ▼
//! normalize()
//!        │
//!        ├──▶ segments()                 (state bands)
//!        │
//!        ├──▶ TransitionMatrix::build()  (next-state model, dwell times)
//!        │
//!        └──▶ rtt_by_state()             (per-state RTT summary)
//! ```
//!
//! Every step is a pure function of its input. Nothing is cached or shared,
//! so calls are safe from any number of threads.

pub mod duration;
pub mod normalize;
pub mod segments;
pub mod stats;
pub mod transition;

pub use normalize::{normalize, parse_payload};
pub use segments::{segment_runs, segments};
pub use stats::{rtt_by_state, RttStats};
pub use transition::TransitionMatrix;

/// Expected time spent in `state` before leaving it, in seconds.
///
/// Free-standing form of [`TransitionMatrix::average_dwell`].
pub fn average_dwell<S: Ord + Copy>(
    matrix: &TransitionMatrix<S>,
    state: &S,
    sample_interval_seconds: f64,
) -> Option<f64> {
    matrix.average_dwell(state, sample_interval_seconds)
}
