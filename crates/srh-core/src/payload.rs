//! Decoding of raw column value payloads.
//!
//! The board API hands out `value` as a JSON document encoded inside a JSON
//! string (`"{\"checked\":true}"`). Fixtures and exported boards may carry
//! the already-decoded object instead. Both are accepted here.
//!
//! Every decoder returns `Option`: a missing, null, or malformed payload is
//! absent data, never an error for the caller.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// Why a payload could not be decoded. Only surfaced through logging.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is empty")]
    Empty,

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes a raw payload into `T`, reporting why it failed.
pub fn try_decode<T: DeserializeOwned>(raw: &Value) -> Result<T, PayloadError> {
    match raw {
        Value::Null => Err(PayloadError::Empty),
        Value::String(s) if s.trim().is_empty() => Err(PayloadError::Empty),
        Value::String(s) => Ok(serde_json::from_str(s)?),
        other => Ok(T::deserialize(other)?),
    }
}

/// Decodes a raw payload into `T`, treating any failure as absent data.
pub fn decode<T: DeserializeOwned>(raw: Option<&Value>) -> Option<T> {
    let raw = raw?;
    match try_decode(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            trace!(error = %e, "raw payload treated as absent");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Checkbox
// ---------------------------------------------------------------------------

/// `{"checked": true}`. Only a boolean `true` counts as checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckboxPayload {
    #[serde(default)]
    pub checked: Option<Value>,
}

impl CheckboxPayload {
    pub fn is_checked(&self) -> bool {
        matches!(self.checked, Some(Value::Bool(true)))
    }
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

/// `{"date": "2024-03-01", "time": "10:30:00"}`; `time` is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatePayload {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl DatePayload {
    /// The date combined with `time` when given, midnight otherwise.
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        let raw = self.date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let base = parse_date_time(raw)?;
        match self.time.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => Some(base.date().and_time(parse_time(t)?)),
            None => Some(base),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// `{"index": 1}` for status-like columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub index: Option<i64>,
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

/// Parses a date or date-time string into a naive local date-time.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` and
/// RFC 3339. Date-only values resolve to midnight. RFC 3339 values are
/// converted from their offset to local time.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}
