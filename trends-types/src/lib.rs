//! # trends-types
//!
//! Core types for RIPE Atlas Trends samples. This crate defines the shapes
//! exchanged between the fetching layer, the analytics engine and the
//! presentation layer of `atlas-trends`.
//!
//! ## Overview
//!
//! - [`TrendsResponse`]: the raw API envelope (`metadata.schema` + `results`)
//!   exactly as the remote service returns it (requires the `serde` feature)
//! - [`Observation`]: one decoded, time-stamped sample
//! - [`Series`]: an ordered, immutable sequence of observations
//! - [`Segment`]: a maximal run of constant state inside a series
//! - [`ResourceKind`]: the category of remote data being requested
//!
//! ## Features
//!
//! - `serde`: JSON serialization of every type and the raw payload envelope
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use trends_types::{Observation, Series};
//!
//! let t0 = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
//! let series = Series::from_observations(vec![
//!     Observation::new(t0, Some(1), Some(12.5), 0),
//!     Observation::new(t0 + chrono::Duration::minutes(4), Some(2), None, 1),
//! ]);
//!
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.mean_interval_seconds(), Some(240.0));
//! ```

mod observation;
#[cfg(feature = "serde")]
mod payload;
mod resource;
mod segment;
mod series;

pub use observation::*;
#[cfg(feature = "serde")]
pub use payload::*;
pub use resource::*;
pub use segment::*;
pub use series::*;

/// Discrete connectivity state of a sample.
///
/// States are small positive integers assigned by the Trends service.
pub type State = u32;
