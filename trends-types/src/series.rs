//! Series - the normalized, time-indexed view of a payload.

use chrono::{DateTime, Utc};

use crate::{Observation, State};

/// An ordered sequence of observations indexed by timestamp.
///
/// A series keeps observations in the order they were given. It does not
/// re-sort; producers are trusted to supply time-ordered input, as the
/// Trends API does.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use trends_types::{Observation, Series};
///
/// let t0 = Utc.timestamp_opt(0, 0).unwrap();
/// let series = Series::from_observations(vec![Observation::new(t0, Some(1), Some(5.0), 0)]);
///
/// assert_eq!(series.states(), vec![Some(1)]);
/// assert_eq!(series.mean_interval_seconds(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Wrap an already ordered list of observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Create an empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observation at a position.
    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    /// Iterate over observations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// The observations as a slice.
    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// First timestamp, if any.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.observations.first().map(|o| o.timestamp)
    }

    /// Last timestamp, if any.
    pub fn stop(&self) -> Option<DateTime<Utc>> {
        self.observations.last().map(|o| o.timestamp)
    }

    /// The timestamp index.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.observations.iter().map(|o| o.timestamp).collect()
    }

    /// The state column.
    pub fn states(&self) -> Vec<Option<State>> {
        self.observations.iter().map(|o| o.state).collect()
    }

    /// The RTT column.
    pub fn rtts(&self) -> Vec<Option<f64>> {
        self.observations.iter().map(|o| o.rtt).collect()
    }

    /// Mean spacing between consecutive observations, in seconds.
    ///
    /// Computed over the whole series. Returns `None` if there are fewer than
    /// two observations.
    pub fn mean_interval_seconds(&self) -> Option<f64> {
        if self.observations.len() < 2 {
            return None;
        }

        let total: f64 = self
            .observations
            .windows(2)
            .map(|w| (w[1].timestamp - w[0].timestamp).num_milliseconds() as f64 / 1000.0)
            .sum();

        Some(total / (self.observations.len() - 1) as f64)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
