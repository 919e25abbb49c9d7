//! Payload normalization.
//!
//! Turns a raw [`TrendsResponse`] into a [`Series`]: every record is decoded
//! against the declared schema, timestamps become UTC instants and RTTs of
//! invalid samples are nulled.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use trends_types::{Observation, RawRecord, Series, State, TrendsResponse};

use crate::error::{Result, TrendsError};

const TIMESTAMP: &str = "timestamp";
const STATUS: &str = "status";
const STATE: &str = "state";
const RTT: &str = "rtt";

/// Parse a payload from JSON text.
pub fn parse_payload(content: &str) -> Result<TrendsResponse> {
    Ok(serde_json::from_str(content)?)
}

/// Normalize a raw payload into a time-indexed series.
///
/// Records are kept in payload order; the payload is trusted to be
/// time-ordered already. With `skip_leading_invalid`, observations before the
/// first one carrying an RTT are dropped, and a payload without any RTT
/// yields an empty series.
///
/// # Errors
///
/// Returns [`TrendsError::Schema`] if the schema lacks `timestamp` or
/// `status`, or if any record does not decode against the schema.
pub fn normalize(payload: &TrendsResponse, skip_leading_invalid: bool) -> Result<Series> {
    let layout = SchemaLayout::from_schema(&payload.metadata.schema)?;

    let mut observations = payload
        .results
        .iter()
        .enumerate()
        .map(|(index, record)| layout.decode(index, record))
        .collect::<Result<Vec<_>>>()?;

    debug!(records = observations.len(), "decoded payload");

    if skip_leading_invalid {
        match observations.iter().position(Observation::has_rtt) {
            Some(first_valid) => {
                if first_valid > 0 {
                    debug!(dropped = first_valid, "trimmed leading samples without rtt");
                }
                observations.drain(..first_valid);
            }
            None => {
                debug!("no sample carries an rtt, series is empty");
                observations.clear();
            }
        }
    }

    Ok(Series::from_observations(observations))
}

/// Positions of the known fields within a schema.
#[derive(Debug)]
struct SchemaLayout<'a> {
    names: &'a [String],
    timestamp: usize,
    status: usize,
    state: Option<usize>,
    rtt: Option<usize>,
}

impl<'a> SchemaLayout<'a> {
    fn from_schema(names: &'a [String]) -> Result<Self> {
        let find = |field: &str| names.iter().position(|n| n == field);

        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(TrendsError::schema(format!("duplicate field `{}`", name)));
            }
        }

        let timestamp = find(TIMESTAMP)
            .ok_or_else(|| TrendsError::schema(format!("schema has no `{}` field", TIMESTAMP)))?;
        let status = find(STATUS)
            .ok_or_else(|| TrendsError::schema(format!("schema has no `{}` field", STATUS)))?;

        Ok(Self {
            names,
            timestamp,
            status,
            state: find(STATE),
            rtt: find(RTT),
        })
    }

    /// Line up a record's values with the schema positions.
    fn align<'r>(&self, index: usize, record: &'r RawRecord) -> Result<Vec<Option<&'r Value>>> {
        match record {
            RawRecord::Positional(values) => {
                if values.len() != self.names.len() {
                    return Err(TrendsError::record(
                        index,
                        format!(
                            "expected {} values, found {}",
                            self.names.len(),
                            values.len()
                        ),
                    ));
                }
                Ok(values.iter().map(Some).collect())
            }
            RawRecord::Keyed(map) => {
                if let Some(unknown) = map.keys().find(|k| !self.names.iter().any(|n| n == *k)) {
                    return Err(TrendsError::record(
                        index,
                        format!("unknown field `{}`", unknown),
                    ));
                }
                Ok(self.names.iter().map(|name| map.get(name)).collect())
            }
        }
    }

    fn decode(&self, index: usize, record: &RawRecord) -> Result<Observation> {
        let values = self.align(index, record)?;
        let at = |pos: Option<usize>| pos.and_then(|p| values[p]).filter(|v| !v.is_null());

        let secs = required_int(index, TIMESTAMP, at(Some(self.timestamp)))?;
        let status = required_int(index, STATUS, at(Some(self.status)))?;
        let state = at(self.state).map(|v| decode_state(index, v)).transpose()?;
        let rtt = at(self.rtt).map(|v| decode_rtt(index, v)).transpose()?;

        Ok(Observation::new(to_utc(index, secs)?, state, rtt, status))
    }
}

fn required_int(index: usize, field: &str, value: Option<&Value>) -> Result<i64> {
    let value =
        value.ok_or_else(|| TrendsError::record(index, format!("missing field `{}`", field)))?;
    value.as_i64().ok_or_else(|| {
        TrendsError::record(index, format!("field `{}` is not an integer: {}", field, value))
    })
}

fn decode_state(index: usize, value: &Value) -> Result<State> {
    value
        .as_u64()
        .filter(|s| *s > 0)
        .and_then(|s| State::try_from(s).ok())
        .ok_or_else(|| {
            TrendsError::record(index, format!("field `state` is not a positive integer: {}", value))
        })
}

fn decode_rtt(index: usize, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| TrendsError::record(index, format!("field `rtt` is not a number: {}", value)))
}

fn to_utc(index: usize, secs: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| TrendsError::record(index, format!("timestamp {} is out of range", secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> TrendsResponse {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> TrendsResponse {
        payload(json!({
            "metadata": { "schema": ["timestamp", "state", "rtt", "status"] },
            "results": [
                [1600000000, 1, null, 0],
                [1600000240, 1, null, 1],
                [1600000480, 2, null, 0],
                [1600000720, 2, 15.5, 0],
                [1600000960, 3, 99.0, 2],
                [1600001200, 3, 16.0, 0]
            ]
        }))
    }

    #[test]
    fn test_trims_leading_samples_without_rtt() {
        let series = normalize(&sample(), true).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.start().unwrap().timestamp(), 1600000720);
        assert_eq!(series.get(0).unwrap().rtt, Some(15.5));
    }

    #[test]
    fn test_keeps_everything_without_trimming() {
        let series = normalize(&sample(), false).unwrap();
        assert_eq!(series.len(), 6);
        assert_eq!(series.states()[0], Some(1));
    }

    #[test]
    fn test_invalid_status_nulls_rtt() {
        let series = normalize(&sample(), true).unwrap();
        let obs = series.get(1).unwrap();

        assert_eq!(obs.status, 2);
        assert_eq!(obs.rtt, None);
        assert_eq!(obs.state, Some(3));
    }

    #[test]
    fn test_no_rtt_at_all_gives_empty_series() {
        let resp = payload(json!({
            "metadata": { "schema": ["timestamp", "state", "rtt", "status"] },
            "results": [[1600000000, 1, null, 0], [1600000240, 1, 10.0, 1]]
        }));

        assert!(normalize(&resp, true).unwrap().is_empty());
        assert_eq!(normalize(&resp, false).unwrap().len(), 2);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let resp = sample();
        assert_eq!(normalize(&resp, true).unwrap(), normalize(&resp, true).unwrap());
    }

    #[test]
    fn test_does_not_resort() {
        let resp = payload(json!({
            "metadata": { "schema": ["timestamp", "rtt", "status"] },
            "results": [[1600000480, 1.0, 0], [1600000000, 2.0, 0]]
        }));

        let series = normalize(&resp, true).unwrap();
        assert_eq!(series.get(0).unwrap().timestamp.timestamp(), 1600000480);
        assert_eq!(series.get(1).unwrap().state, None);
    }

    #[test]
    fn test_keyed_records() {
        let resp = payload(json!({
            "metadata": { "schema": ["timestamp", "state", "rtt", "status"] },
            "results": [
                { "timestamp": 1600000000, "rtt": 8.25, "status": 0, "state": 1 },
                { "timestamp": 1600000240, "status": 0 }
            ]
        }));

        let series = normalize(&resp, true).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(1).unwrap().state, None);
        assert_eq!(series.get(1).unwrap().rtt, None);
    }

    #[test]
    fn test_unknown_key_is_schema_error() {
        let resp = payload(json!({
            "metadata": { "schema": ["timestamp", "status"] },
            "results": [{ "timestamp": 1600000000, "status": 0, "loss": 0.5 }]
        }));

        let err = normalize(&resp, false).unwrap_err();
        assert!(matches!(err, TrendsError::Schema { record: Some(0), .. }));
        assert!(err.to_string().contains("loss"));
    }

    #[test]
    fn test_wrong_arity_is_schema_error() {
        let resp = payload(json!({
            "metadata": { "schema": ["timestamp", "rtt", "status"] },
            "results": [[1600000000, 1.0, 0], [1600000240, 0]]
        }));

        let err = normalize(&resp, false).unwrap_err();
        assert!(matches!(err, TrendsError::Schema { record: Some(1), .. }));
    }

    #[test]
    fn test_missing_required_fields() {
        let no_status = payload(json!({
            "metadata": { "schema": ["timestamp", "rtt"] },
            "results": []
        }));
        assert!(matches!(
            normalize(&no_status, true).unwrap_err(),
            TrendsError::Schema { record: None, .. }
        ));

        let null_timestamp = payload(json!({
            "metadata": { "schema": ["timestamp", "status"] },
            "results": [[null, 0]]
        }));
        assert!(normalize(&null_timestamp, false)
            .unwrap_err()
            .to_string()
            .contains("missing field `timestamp`"));
    }

    #[test]
    fn test_bad_values_are_schema_errors() {
        for record in [
            json!([1600000000, 0, 1.0, 0]),
            json!([1600000000, "up", 1.0, 0]),
            json!([1600000000, 1, "fast", 0]),
            json!([1600000000.5, 1, 1.0, 0]),
        ] {
            let resp = payload(json!({
                "metadata": { "schema": ["timestamp", "state", "rtt", "status"] },
                "results": [record]
            }));
            assert!(matches!(
                normalize(&resp, false).unwrap_err(),
                TrendsError::Schema { record: Some(0), .. }
            ));
        }
    }

    #[test]
    fn test_extra_schema_fields_are_ignored() {
        let resp = payload(json!({
            "metadata": { "schema": ["timestamp", "loss", "rtt", "status"] },
            "results": [[1600000000, 0.0, 5.0, 0]]
        }));

        let series = normalize(&resp, true).unwrap();
        assert_eq!(series.get(0).unwrap().rtt, Some(5.0));
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        assert!(matches!(parse_payload("not json"), Err(TrendsError::Json(_))));
    }
}
