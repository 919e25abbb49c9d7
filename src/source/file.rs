//! File-based payload source.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use trends_types::TrendsResponse;

use super::PayloadSource;
use crate::data::parse_payload;
use crate::error::Result;

/// A payload source that reads a Trends response saved as a JSON file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PayloadSource for FileSource {
    fn load(&mut self) -> Result<TrendsResponse> {
        let content = fs::read_to_string(&self.path)?;
        debug!(path = %self.path.display(), bytes = content.len(), "read payload file");
        parse_payload(&content)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrendsError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "metadata": { "schema": ["timestamp", "state", "rtt", "status"] },
            "results": [[1600000000, 1, 12.5, 0], [1600000240, 2, null, 1]]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/ticks.json");
        assert_eq!(source.path(), Path::new("/tmp/ticks.json"));
        assert_eq!(source.description(), "file: /tmp/ticks.json");
    }

    #[test]
    fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        let payload = source.load().unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.metadata.schema[2], "rtt");
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/ticks.json");
        let err = source.load().unwrap_err();
        assert!(matches!(err, TrendsError::Io(_)));
        assert!(err.to_string().contains("Failed to read payload"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        let err = source.load().unwrap_err();
        assert!(matches!(err, TrendsError::Json(_)));
        assert!(err.to_string().contains("Failed to parse payload"));
    }
}
