//! Analysis reports.
//!
//! Collects everything derived from one series (segments, the transition
//! model, per-state dwell times and RTT summaries) into a single value that
//! can be printed as text or exported as JSON.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use trends_types::{Segment, Series, State};

use crate::config::OutputFormat;
use crate::data::duration::format_dwell;
use crate::data::{rtt_by_state, segments, RttStats, TransitionMatrix};
use crate::error::Result;

/// Per-state legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    /// The state (`None` for samples without one).
    pub state: Option<State>,
    /// Samples in this state.
    pub samples: usize,
    /// Expected dwell time in seconds; infinite or NaN in degenerate cases.
    pub avg_dwell_seconds: f64,
    /// Human-readable dwell time.
    pub avg_duration: String,
    /// RTT distribution of valid samples in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtt: Option<RttStats>,
}

/// Everything derived from one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub observations: usize,
    pub start: Option<DateTime<Utc>>,
    pub stop: Option<DateTime<Utc>>,
    pub mean_interval_seconds: Option<f64>,
    pub segments: Vec<Segment>,
    pub transitions: TransitionMatrix,
    pub states: Vec<StateSummary>,
}

impl AnalysisReport {
    /// Analyze a normalized series.
    ///
    /// # Errors
    ///
    /// Fails with [`TrendsError::EmptySeries`](crate::TrendsError::EmptySeries)
    /// if the series has no observations.
    pub fn from_series(series: &Series, source: &str) -> Result<Self> {
        let segments = segments(series)?;
        let transitions = TransitionMatrix::from_series(series);
        let interval = series.mean_interval_seconds();
        let mut rtt = rtt_by_state(series);

        let states = transitions
            .alphabet()
            .iter()
            .map(|state| {
                let dwell = transitions
                    .average_dwell(state, interval.unwrap_or(f64::NAN))
                    .unwrap_or(f64::NAN);
                StateSummary {
                    state: *state,
                    samples: series.iter().filter(|o| o.state == *state).count(),
                    avg_dwell_seconds: dwell,
                    avg_duration: format_dwell(dwell),
                    rtt: state.and_then(|s| rtt.remove(&s)),
                }
            })
            .collect();

        debug!(source, observations = series.len(), "built analysis report");

        Ok(Self {
            source: source.to_string(),
            observations: series.len(),
            start: series.start(),
            stop: series.stop(),
            mean_interval_seconds: interval,
            segments,
            transitions,
            states,
        })
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Write the report as pretty JSON.
    pub fn export(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn state_label(state: &Option<State>) -> String {
    match state {
        Some(s) => s.to_string(),
        None => "-".to_string(),
    }
}

fn timestamp(ts: &Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source: {}", self.source)?;
        writeln!(
            f,
            "Observations: {} ({} .. {})",
            self.observations,
            timestamp(&self.start),
            timestamp(&self.stop)
        )?;
        match self.mean_interval_seconds {
            Some(dt) => writeln!(f, "Mean interval: {:.1}s", dt)?,
            None => writeln!(f, "Mean interval: n/a")?,
        }

        writeln!(f)?;
        writeln!(f, "Segments ({}):", self.segments.len())?;
        for seg in &self.segments {
            writeln!(
                f,
                "  [{:>5}, {:>5})  state {}",
                seg.start_index,
                seg.stop_index,
                state_label(&seg.state)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Transition matrix:")?;
        write!(f, "  {:>5}", "")?;
        for state in self.transitions.alphabet() {
            write!(f, " {:>7}", state_label(state))?;
        }
        writeln!(f)?;
        for (state, row) in self.transitions.alphabet().iter().zip(self.transitions.matrix()) {
            write!(f, "  {:>5}", state_label(state))?;
            for p in row {
                write!(f, " {:>7.3}", p)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "States:")?;
        for summary in &self.states {
            write!(
                f,
                "  State {}: {} samples, avg. duration {}",
                state_label(&summary.state),
                summary.samples,
                if summary.avg_duration.is_empty() { "< 1 minute" } else { summary.avg_duration.as_str() }
            )?;
            if let Some(rtt) = &summary.rtt {
                write!(
                    f,
                    ", rtt {:.1}/{:.1}/{:.1} ms (weight {:.2})",
                    rtt.min, rtt.mean, rtt.max, rtt.weight
                )?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
