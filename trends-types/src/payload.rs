//! Raw Trends API payload envelope.
//!
//! These types match the JSON returned by the Trends API. Records are kept
//! undecoded; their meaning depends on the schema declared alongside them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete response from the Trends API.
///
/// ```json
/// {
///   "metadata": { "schema": ["timestamp", "state", "rtt", "status"] },
///   "results": [[1600000000, 1, 12.3, 0], [1600000240, 1, null, 1]]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsResponse {
    /// Description of the records.
    pub metadata: Metadata,

    /// Records matching `metadata.schema`.
    #[serde(default)]
    pub results: Vec<RawRecord>,
}

/// Response metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Ordered field names of every record.
    pub schema: Vec<String>,
}

/// One undecoded record.
///
/// The API emits positional arrays. Keyed objects are accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    /// Values in schema order.
    Positional(Vec<Value>),
    /// Values keyed by schema field name.
    Keyed(Map<String, Value>),
}

impl TrendsResponse {
    /// Build a response from a schema and records.
    pub fn new(schema: Vec<String>, results: Vec<RawRecord>) -> Self {
        Self {
            metadata: Metadata { schema },
            results,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the response carries no records.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Position of a field within the schema.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.metadata.schema.iter().position(|f| f == name)
    }
}
