// src/domain/ingest.rs

use crate::domain::report::{Gps, LocationDetails, ReportStatus};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_REPORTER: &str = "Anonymous";
pub const DEFAULT_CONTACT: &str = "Not provided";

/// Body of `POST /reports`, as sent by the client. Loosely typed on purpose:
/// `gps` may be a `"lat, lng"` string or an object, and `locationDetails`
/// is whatever the client's geocoder produced.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub gps: Option<Value>,
    pub location_details: Option<Value>,
    pub photo_url: Option<String>,
    pub reporter: Option<String>,
    pub contact: Option<String>,
}

/// A validated submission with defaults filled in, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub gps: Option<Gps>,
    pub location_details: Option<LocationDetails>,
    pub photo_url: Option<String>,
    pub reporter: String,
    pub contact: String,
}

impl NewReport {
    /// Validates required fields and normalises the optional ones.
    /// Only a missing/empty title or description is an error; bad GPS or
    /// location data is dropped silently.
    pub fn from_request(req: CreateReportRequest, now: DateTime<Utc>) -> Result<Self, ServerError> {
        let title = non_empty(req.title);
        let description = non_empty(req.description);

        let (title, description) = match (title, description) {
            (Some(t), Some(d)) => (t, d),
            _ => {
                return Err(ServerError::BadRequest(
                    "Title and description are required".into(),
                ))
            }
        };

        Ok(NewReport {
            title,
            description,
            status: ReportStatus::Submitted,
            created_at: now,
            gps: req.gps.as_ref().and_then(parse_gps),
            location_details: req.location_details.and_then(parse_location_details),
            photo_url: non_empty(req.photo_url),
            reporter: non_empty(req.reporter).unwrap_or_else(|| DEFAULT_REPORTER.to_string()),
            contact: non_empty(req.contact).unwrap_or_else(|| DEFAULT_CONTACT.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Normalises client GPS input.
///
/// - `"lat, lng"`: exactly two comma-separated parts, each starting with a finite float.
/// - `{latitude, longitude}`: both present and truthy, coerced to finite floats.
///
/// Anything else yields `None`.
pub fn parse_gps(value: &Value) -> Option<Gps> {
    match value {
        Value::String(s) => {
            let parts: Vec<&str> = s.split(',').map(str::trim).collect();
            if parts.len() != 2 {
                return None;
            }
            let latitude = parse_finite(parts[0])?;
            let longitude = parse_finite(parts[1])?;
            Some(Gps { latitude, longitude })
        }
        Value::Object(map) => {
            let lat = map.get("latitude").filter(|v| is_truthy(v))?;
            let lng = map.get("longitude").filter(|v| is_truthy(v))?;
            Some(Gps {
                latitude: coerce_float(lat)?,
                longitude: coerce_float(lng)?,
            })
        }
        _ => None,
    }
}

/// Parses the longest leading decimal number and ignores whatever follows,
/// so `"12.9716 N"` reads as `12.9716`.
fn parse_finite(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while b.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let int_start = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let mut end = digits_from(int_start);
    let mut has_digits = end > int_start;

    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        if has_digits {
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    // An exponent only counts when digits follow it.
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_finite(s.trim()),
        _ => None,
    }
}

// Mirrors client-side truthiness: null, false, 0 and "" do not count as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Keeps the location breakdown only when it is an object of the expected shape.
pub fn parse_location_details(value: Value) -> Option<LocationDetails> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}
