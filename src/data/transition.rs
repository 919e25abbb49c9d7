//! Discrete-time state transition model.
//!
//! Builds an empirical, row-stochastic transition matrix from a state
//! sequence and derives expected dwell times from its diagonal.

use serde::Serialize;
use tracing::{debug, warn};

use trends_types::{Series, State};

/// Empirical next-state probabilities over the observed state alphabet.
///
/// `matrix[i][j]` is the fraction of transitions out of `alphabet[i]` that
/// went to `alphabet[j]`. A state that never appears as the source of a
/// transition (only possible for the last element of the sequence) has a
/// row of NaN; callers must be prepared for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionMatrix<S = Option<State>> {
    alphabet: Vec<S>,
    matrix: Vec<Vec<f64>>,
}

impl TransitionMatrix {
    /// Build the model from a series' state column.
    pub fn from_series(series: &Series) -> Self {
        Self::build(&series.states())
    }
}

impl<S: Ord + Copy> TransitionMatrix<S> {
    /// Count adjacent pairs of `sequence` and normalize each row by its sum.
    ///
    /// No smoothing is applied. Rows with no outgoing transitions divide by
    /// zero and become NaN.
    pub fn build(sequence: &[S]) -> Self {
        let mut alphabet = sequence.to_vec();
        alphabet.sort_unstable();
        alphabet.dedup();

        let n = alphabet.len();
        let mut matrix = vec![vec![0.0; n]; n];

        // Every element comes from the alphabet, so lookups cannot fail
        let index = |s: &S| alphabet.binary_search(s).unwrap_or_default();
        for pair in sequence.windows(2) {
            matrix[index(&pair[0])][index(&pair[1])] += 1.0;
        }

        let mut empty_rows = 0;
        for row in &mut matrix {
            let total: f64 = row.iter().sum();
            if total == 0.0 {
                empty_rows += 1;
            }
            for cell in row.iter_mut() {
                *cell /= total;
            }
        }

        debug!(states = n, transitions = sequence.len().saturating_sub(1), "built transition matrix");
        if empty_rows > 0 {
            warn!(rows = empty_rows, "states without outgoing transitions have undefined rows");
        }

        Self { alphabet, matrix }
    }

    /// Observed states, ascending.
    pub fn alphabet(&self) -> &[S] {
        &self.alphabet
    }

    /// Row-major probabilities, indexed like [`alphabet`](Self::alphabet).
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.alphabet.len()
    }

    /// Check if no state was observed.
    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty()
    }

    /// Row/column index of a state.
    pub fn index_of(&self, state: &S) -> Option<usize> {
        self.alphabet.binary_search(state).ok()
    }

    /// Probability of moving from `from` to `to` on the next sample.
    pub fn probability(&self, from: &S, to: &S) -> Option<f64> {
        Some(self.matrix[self.index_of(from)?][self.index_of(to)?])
    }

    /// Probability of staying in `state` on the next sample.
    pub fn self_transition(&self, state: &S) -> Option<f64> {
        self.probability(state, state)
    }

    /// Expected time spent in `state` before leaving it.
    ///
    /// Computed as `1 / (1 - p_self)` sample intervals, scaled by
    /// `sample_interval_seconds`. A state that never leaves gives positive
    /// infinity; an undefined row gives NaN. Returns `None` for a state
    /// outside the alphabet.
    pub fn average_dwell(&self, state: &S, sample_interval_seconds: f64) -> Option<f64> {
        self.self_transition(state)
            .map(|p_self| (1.0 / (1.0 - p_self)) * sample_interval_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_alphabet_is_sorted_and_distinct() {
        let tm = TransitionMatrix::build(&[3u32, 1, 3, 2, 1, 1]);
        assert_eq!(tm.alphabet(), &[1, 2, 3]);
        assert_eq!(tm.index_of(&3), Some(2));
        assert_eq!(tm.index_of(&4), None);
    }

    #[test]
    fn test_counts_adjacent_pairs() {
        // 1->1, 1->2, 2->2, 2->1, 1->1
        let tm = TransitionMatrix::build(&[1u32, 1, 2, 2, 1, 1]);

        assert!((tm.probability(&1, &1).unwrap() - 2.0 / 3.0).abs() < TOLERANCE);
        assert!((tm.probability(&1, &2).unwrap() - 1.0 / 3.0).abs() < TOLERANCE);
        assert!((tm.probability(&2, &1).unwrap() - 0.5).abs() < TOLERANCE);
        assert!((tm.probability(&2, &2).unwrap() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_rows_are_stochastic() {
        let tm = TransitionMatrix::build(&[1u32, 2, 3, 1, 1, 3, 2, 2, 1, 3, 3, 1]);
        for row in tm.matrix() {
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < TOLERANCE, "row sums to {}", sum);
        }
    }

    #[test]
    fn test_sink_state_row_is_nan() {
        // 3 only appears last, so it is never a source
        let tm = TransitionMatrix::build(&[1u32, 2, 1, 3]);
        assert!(tm.matrix()[2].iter().all(|p| p.is_nan()));
        assert!(tm.average_dwell(&3, 240.0).unwrap().is_nan());
    }

    #[test]
    fn test_absorbing_state_dwells_forever() {
        let tm = TransitionMatrix::build(&[5u32, 5, 5, 5]);
        assert_eq!(tm.self_transition(&5), Some(1.0));
        assert_eq!(tm.average_dwell(&5, 240.0), Some(f64::INFINITY));
    }

    #[test]
    fn test_average_dwell_scales_by_interval() {
        // p_self(1) = 3/4 -> 4 intervals
        let tm = TransitionMatrix::build(&[1u32, 1, 1, 1, 2, 1]);
        let dwell = tm.average_dwell(&1, 240.0).unwrap();
        assert!((dwell - 960.0).abs() < 1e-9);

        // p_self(2) = 0 -> exactly one interval
        assert_eq!(tm.average_dwell(&2, 240.0), Some(240.0));
        assert_eq!(tm.average_dwell(&9, 240.0), None);
    }

    #[test]
    fn test_empty_and_single() {
        let empty: TransitionMatrix<u32> = TransitionMatrix::build(&[]);
        assert!(empty.is_empty());

        let single = TransitionMatrix::build(&[2u32]);
        assert_eq!(single.len(), 1);
        assert!(single.matrix()[0][0].is_nan());
    }

    #[test]
    fn test_missing_states_form_their_own_row() {
        let tm = TransitionMatrix::build(&[Some(1u32), None, Some(1), None]);
        assert_eq!(tm.alphabet(), &[None, Some(1)]);
        assert_eq!(tm.probability(&Some(1), &None), Some(1.0));
    }
}
