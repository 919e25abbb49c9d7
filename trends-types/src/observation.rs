//! A single decoded sample.

use chrono::{DateTime, Utc};

use crate::State;

/// Status code of a valid sample.
pub const STATUS_OK: i64 = 0;

/// One time-stamped measurement sample.
///
/// `rtt` is always `None` when `status != 0`: such a sample is invalid for
/// latency purposes, but its `state` is kept as reported.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Sample time, UTC.
    pub timestamp: DateTime<Utc>,

    /// Connectivity state, if the service reported one.
    pub state: Option<State>,

    /// Round-trip time in milliseconds.
    pub rtt: Option<f64>,

    /// Service status code (`0` = valid).
    pub status: i64,
}

impl Observation {
    /// Create an observation, nulling `rtt` for non-zero statuses.
    pub fn new(timestamp: DateTime<Utc>, state: Option<State>, rtt: Option<f64>, status: i64) -> Self {
        let rtt = if status == STATUS_OK { rtt } else { None };
        Self {
            timestamp,
            state,
            rtt,
            status,
        }
    }

    /// Whether the service flagged this sample as valid.
    pub fn is_valid(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Whether this sample carries a usable RTT.
    pub fn has_rtt(&self) -> bool {
        self.rtt.is_some()
    }
}
