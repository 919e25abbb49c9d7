//! Reader-based payload source.

use std::fmt;
use std::io::Read;

use trends_types::TrendsResponse;

use super::PayloadSource;
use crate::data::parse_payload;
use crate::error::Result;

/// A payload source that reads from any [`Read`] implementation.
///
/// Used for standard input, and handy for in-memory payloads in tests.
pub struct ReaderSource<R> {
    reader: R,
    description: String,
}

impl<R: Read> ReaderSource<R> {
    /// Create a new reader source with a display label.
    pub fn new(reader: R, label: &str) -> Self {
        Self {
            reader,
            description: format!("reader: {}", label),
        }
    }
}

impl ReaderSource<std::io::Stdin> {
    /// Read the payload from standard input.
    pub fn stdin() -> Self {
        Self::new(std::io::stdin(), "stdin")
    }
}

impl<R> fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderSource")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<R: Read> PayloadSource for ReaderSource<R> {
    fn load(&mut self) -> Result<TrendsResponse> {
        let mut content = String::new();
        self.reader.read_to_string(&mut content)?;
        parse_payload(&content)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
