//! Query descriptions and the advisory cost estimate.
//!
//! A [`TrendsQuery`] describes one request to the Trends API: which resource,
//! which measurement/probe pair and which time range. It renders the request
//! path and parameters but never performs the request.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use trends_types::ResourceKind;

use crate::error::{Result, TrendsError};

/// Nominal spacing between samples used by the estimate (4 minutes).
pub const SAMPLE_INTERVAL_SECONDS: f64 = 240.0;

/// Samples per second of response time for `ticks`.
pub const TICKS_THROUGHPUT: f64 = 3150.0;

/// Samples per second of response time for every other kind.
pub const DEFAULT_THROUGHPUT: f64 = 450.0;

/// Default query window in days when no start is given.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Predict how long the API will take to answer a query, in seconds.
///
/// The span is converted to a count of 4-minute samples `n`, and the result
/// is `1 + n / k` rounded to one decimal, with `k` depending on the resource
/// kind. This is a calibrated heuristic for logging only, not a guarantee.
pub fn estimate(kind: ResourceKind, start: DateTime<Utc>, stop: DateTime<Utc>) -> f64 {
    let k = match kind {
        ResourceKind::Ticks => TICKS_THROUGHPUT,
        _ => DEFAULT_THROUGHPUT,
    };

    let span = (stop - start).num_milliseconds() as f64 / 1000.0;
    let samples = span / SAMPLE_INTERVAL_SECONDS;
    round_tenth(1.0 + samples / k)
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// One request to the Trends API.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendsQuery {
    pub resource: ResourceKind,
    pub msm_id: u64,
    pub prb_id: u64,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

impl TrendsQuery {
    /// Create a query builder.
    pub fn builder(resource: ResourceKind, msm_id: u64, prb_id: u64) -> TrendsQueryBuilder {
        TrendsQueryBuilder {
            resource,
            msm_id,
            prb_id,
            start: None,
            stop: None,
            window: Duration::days(DEFAULT_WINDOW_DAYS),
        }
    }

    /// Request path relative to the API root, e.g. `/trends/1001/6001/summary`.
    pub fn path(&self) -> String {
        let mut path = format!("/{}/{}/{}", self.resource.resource(), self.msm_id, self.prb_id);
        if let Some(sub) = self.resource.subresource() {
            path.push('/');
            path.push_str(sub);
        }
        path
    }

    /// Query parameters as `(name, epoch seconds)` pairs.
    pub fn params(&self) -> [(&'static str, i64); 2] {
        [("start", self.start.timestamp()), ("stop", self.stop.timestamp())]
    }

    /// Full request URL under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        let query = self
            .params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}{}?{}", base_url.trim_end_matches('/'), self.path(), query)
    }

    /// Advisory response time for this query, in seconds.
    pub fn estimated_time(&self) -> f64 {
        estimate(self.resource, self.start, self.stop)
    }

    /// Log the advisory estimate, as done before issuing a request.
    pub fn log_estimate(&self) -> f64 {
        let secs = self.estimated_time();
        info!(path = %self.path(), "Estimated query time: {:.1}s", secs);
        secs
    }
}

/// Builder for [`TrendsQuery`].
#[derive(Debug, Clone)]
pub struct TrendsQueryBuilder {
    resource: ResourceKind,
    msm_id: u64,
    prb_id: u64,
    start: Option<DateTime<Utc>>,
    stop: Option<DateTime<Utc>>,
    window: Duration,
}

impl TrendsQueryBuilder {
    /// Set the range start.
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the range stop.
    pub fn stop(mut self, stop: DateTime<Utc>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Span used for `start` when it is not set explicitly.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Build the query, defaulting `stop` to now and `start` to `stop - window`.
    ///
    /// # Errors
    ///
    /// [`TrendsError::WindowOutOfRange`] if `stop - window` is not a valid
    /// instant, [`TrendsError::InvalidRange`] if `stop` precedes `start`.
    pub fn build(self) -> Result<TrendsQuery> {
        let stop = self.stop.unwrap_or_else(Utc::now);
        let start = match self.start {
            Some(start) => start,
            None => stop
                .checked_sub_signed(self.window)
                .ok_or(TrendsError::WindowOutOfRange {
                    days: self.window.num_days(),
                })?,
        };

        if stop < start {
            return Err(TrendsError::InvalidRange { start, stop });
        }

        Ok(TrendsQuery {
            resource: self.resource,
            msm_id: self.msm_id,
            prb_id: self.prb_id,
            start,
            stop,
        })
    }
}
