//! # atlas-trends
//!
//! Analytics for RIPE Atlas Trends samples.
//!
//! This crate takes the raw, irregularly sampled round-trip-time and
//! connectivity-state values returned by the Trends API and derives
//! descriptive statistics from them: contiguous state segments, a
//! discrete-time state-transition model and expected state dwell times.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐    ┌───────────┐    ┌──────────┐    ┌────────┐ │
//! │  │ source  │───▶│   data    │───▶│  report  │───▶│ stdout │ │
//! │  │ (input) │    │(analytics)│    │ (output) │    │ / file │ │
//! │  └─────────┘    └───────────┘    └──────────┘    └────────┘ │
//! │                                                              │
//! │  ┌─────────┐                                                 │
//! │  │  query  │──▶ path / params / advisory estimate            │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Payload source abstraction ([`PayloadSource`] trait) for files
//!   and readers
//! - **[`data`]**: The analytics engine - normalization, segmentation, the
//!   transition model and per-state RTT summaries
//! - **[`report`]**: Assembles an [`AnalysisReport`] and renders it as text or JSON
//! - **[`query`]**: Describes Trends API requests and estimates their cost
//! - **[`config`]**: Layered [`Settings`]
//!
//! ## Usage
//!
//! ```
//! use atlas_trends::data::{normalize, parse_payload, segments, TransitionMatrix};
//!
//! let payload = parse_payload(r#"{
//!     "metadata": { "schema": ["timestamp", "state", "rtt", "status"] },
//!     "results": [
//!         [1600000000, 1, 10.5, 0],
//!         [1600000240, 1, 11.0, 0],
//!         [1600000480, 2, 80.0, 0],
//!         [1600000720, 2, 85.0, 0]
//!     ]
//! }"#)?;
//!
//! let series = normalize(&payload, true)?;
//! let segs = segments(&series)?;
//! let model = TransitionMatrix::from_series(&series);
//!
//! assert_eq!(segs.len(), 2);
//! assert_eq!(model.average_dwell(&Some(1), 240.0), Some(480.0));
//! # Ok::<(), atlas_trends::TrendsError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use config::{OutputFormat, Settings};
pub use data::TransitionMatrix;
pub use error::{Result, TrendsError};
pub use query::{estimate, TrendsQuery};
pub use report::{AnalysisReport, StateSummary};
pub use source::{FileSource, PayloadSource, ReaderSource};
pub use trends_types::{Observation, ResourceKind, Segment, Series, State, TrendsResponse};
