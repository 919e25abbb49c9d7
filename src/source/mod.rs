//! Payload source abstraction.
//!
//! This module provides a trait-based abstraction for obtaining raw Trends
//! payloads from files on disk, standard input, or any other reader. Fetching
//! payloads over the network is left to callers.

mod file;
mod reader;

pub use file::FileSource;
pub use reader::ReaderSource;

use std::fmt::Debug;

use trends_types::TrendsResponse;

use crate::error::Result;

/// Trait for obtaining a raw Trends payload.
///
/// # Example
///
/// ```no_run
/// use atlas_trends::{FileSource, PayloadSource};
///
/// let mut source = FileSource::new("ticks.json");
/// let payload = source.load()?;
/// println!("{} records from {}", payload.len(), source.description());
/// # Ok::<(), atlas_trends::TrendsError>(())
/// ```
pub trait PayloadSource: Debug {
    /// Read and parse the payload.
    fn load(&mut self) -> Result<TrendsResponse>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
