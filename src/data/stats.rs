//! Per-state RTT statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use trends_types::{Series, State};

/// RTT distribution of the valid samples observed in one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RttStats {
    /// Valid samples in this state.
    pub count: usize,
    /// Share of all valid samples in the series.
    pub weight: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Compute RTT statistics for every state that has at least one valid RTT.
pub fn rtt_by_state(series: &Series) -> BTreeMap<State, RttStats> {
    let mut samples: BTreeMap<State, Vec<f64>> = BTreeMap::new();
    let mut total = 0usize;

    for obs in series {
        if let Some(rtt) = obs.rtt {
            total += 1;
            if let Some(state) = obs.state {
                samples.entry(state).or_default().push(rtt);
            }
        }
    }

    samples
        .into_iter()
        .map(|(state, rtts)| {
            let count = rtts.len();
            let min = rtts.iter().copied().fold(f64::INFINITY, f64::min);
            let max = rtts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = rtts.iter().sum::<f64>() / count as f64;
            let stats = RttStats {
                count,
                weight: count as f64 / total as f64,
                min,
                max,
                mean,
            };
            (state, stats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use trends_types::Observation;

    fn make_series(samples: &[(Option<State>, Option<f64>, i64)]) -> Series {
        let t0 = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        Series::from_observations(
            samples
                .iter()
                .enumerate()
                .map(|(i, (state, rtt, status))| {
                    Observation::new(t0 + Duration::minutes(4 * i as i64), *state, *rtt, *status)
                })
                .collect(),
        )
    }

    #[test]
    fn empty_series_has_no_stats() {
        assert!(rtt_by_state(&Series::empty()).is_empty());
    }

    #[test]
    fn weights_are_shares_of_valid_samples() {
        let series = make_series(&[
            (Some(1), Some(10.0), 0),
            (Some(1), Some(20.0), 0),
            (Some(2), Some(50.0), 0),
            (Some(2), Some(90.0), 3),
            (Some(3), None, 0),
        ]);

        let stats = rtt_by_state(&series);
        assert_eq!(stats.len(), 2);

        let one = &stats[&1];
        assert_eq!(one.count, 2);
        assert!((one.weight - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(one.min, 10.0);
        assert_eq!(one.max, 20.0);
        assert_eq!(one.mean, 15.0);

        let two = &stats[&2];
        assert_eq!(two.count, 1);
        assert_eq!(two.mean, 50.0);
        assert!(!stats.contains_key(&3));
    }
}
