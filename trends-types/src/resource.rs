//! Resource kinds exposed by the Trends API.

use core::fmt;
use core::str::FromStr;

/// The category of remote data being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Raw per-sample data.
    #[cfg_attr(feature = "serde", serde(rename = "ticks"))]
    Ticks,
    /// Aggregated trend data.
    #[cfg_attr(feature = "serde", serde(rename = "trends"))]
    Trends,
    /// Summary of the aggregated trend data.
    #[cfg_attr(feature = "serde", serde(rename = "trends/summary"))]
    TrendsSummary,
}

impl ResourceKind {
    /// All known kinds.
    pub const ALL: [ResourceKind; 3] = [Self::Ticks, Self::Trends, Self::TrendsSummary];

    /// The canonical name, e.g. `"trends/summary"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ticks => "ticks",
            Self::Trends => "trends",
            Self::TrendsSummary => "trends/summary",
        }
    }

    /// Top-level path component.
    pub const fn resource(&self) -> &'static str {
        match self {
            Self::Ticks => "ticks",
            Self::Trends | Self::TrendsSummary => "trends",
        }
    }

    /// Trailing path component, if this kind has one.
    pub const fn subresource(&self) -> Option<&'static str> {
        match self {
            Self::TrendsSummary => Some("summary"),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResourceKindError(pub String);

impl fmt::Display for ParseResourceKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource kind: {}", self.0)
    }
}

impl std::error::Error for ParseResourceKindError {}

impl FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ticks" => Ok(Self::Ticks),
            "trends" => Ok(Self::Trends),
            "trends/summary" | "summary" => Ok(Self::TrendsSummary),
            other => Err(ParseResourceKindError(other.to_string())),
        }
    }
}
