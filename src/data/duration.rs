use chrono::Duration;

use crate::error::{Result, TrendsError};

/// Suffix to seconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, i64)] = &[
    ("min", 60),
    ("d", 86_400),
    ("h", 3_600),
    ("m", 60),
    ("s", 1),
];

/// Periods used for human-readable output, largest first.
const PERIODS: &[(&str, i64)] = &[
    ("year", 60 * 60 * 24 * 365),
    ("month", 60 * 60 * 24 * 30),
    ("day", 60 * 60 * 24),
    ("hour", 60 * 60),
    ("minute", 60),
];

/// Parse window strings like "7d", "12h", "30m", "90min", "240s"
///
/// Spans that do not fit in a [`Duration`] are rejected like malformed ones.
pub fn parse_span(s: &str) -> Result<Duration> {
    let s = s.trim();
    let invalid = || TrendsError::InvalidSpan(s.to_string());

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: i64 = val_str.trim().parse().map_err(|_| invalid())?;
            return val
                .checked_mul(*multiplier)
                .and_then(Duration::try_seconds)
                .ok_or_else(invalid);
        }
    }

    Err(invalid())
}

/// Format a number of seconds as e.g. "2 days, 3 hours, 1 minute".
///
/// A unit is only used when the remaining seconds strictly exceed it, and
/// seconds are never shown, so anything up to one minute formats as "".
pub fn format_period(seconds: f64) -> String {
    let mut seconds = seconds as i64;
    let mut parts = Vec::new();

    for (name, period) in PERIODS {
        if seconds > *period {
            let value = seconds / period;
            seconds %= period;
            let plural = if value > 1 { "s" } else { "" };
            parts.push(format!("{} {}{}", value, name, plural));
        }
    }

    parts.join(", ")
}

/// Format an average dwell time for display.
pub fn format_dwell(seconds: f64) -> String {
    if seconds == f64::INFINITY {
        "∞".to_string()
    } else if seconds.is_nan() {
        "n/a".to_string()
    } else {
        format_period(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_span("7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_span("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_span("90min").unwrap(), Duration::minutes(90));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse_span("7 weeks").is_err());
        assert!(parse_span("xh").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        // Overflows the multiplication
        let err = parse_span("99999999999999999d").unwrap_err();
        assert!(matches!(err, TrendsError::InvalidSpan(ref s) if s == "99999999999999999d"));

        // One second past the largest representable duration
        let err = parse_span("9223372036854776s").unwrap_err();
        assert!(matches!(err, TrendsError::InvalidSpan(_)));

        assert_eq!(parse_span("9223372036854775s").unwrap(), Duration::MAX - Duration::milliseconds(807));
    }

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(3.0 * 86_400.0 + 2.0 * 3_600.0 + 120.0), "3 days, 2 hours, 2 minutes");
        assert_eq!(format_period(90_000.0), "1 day, 60 minutes");
        assert_eq!(format_period(90_061.0), "1 day, 1 hour, 1 minute");
        assert_eq!(format_period(960.0), "16 minutes");
    }

    #[test]
    fn test_format_period_exact_units_are_skipped() {
        // Exactly one unit is not "greater than" the unit
        assert_eq!(format_period(60.0), "");
        assert_eq!(format_period(3_600.0), "60 minutes");
    }

    #[test]
    fn test_format_dwell() {
        assert_eq!(format_dwell(f64::INFINITY), "∞");
        assert_eq!(format_dwell(f64::NAN), "n/a");
        assert_eq!(format_dwell(240.0), "4 minutes");
    }
}
