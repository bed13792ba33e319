//! Values decoded once at the JSON boundary.
//!
//! Backend payloads have no fixed schema. Instead of probing the runtime
//! shape every time a value is rendered, [`ViewValue::from_json`] classifies
//! each value once and the renderer matches on the result.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};

/// A decoded backend value.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewValue {
    /// A string that reads as an ISO-8601 timestamp.
    Date(DateValue),
    /// A string or a number.
    Scalar(Scalar),
    Array(Vec<ViewValue>),
    /// Keyed mapping, in source order.
    Object(Vec<(String, ViewValue)>),
    Null,
    /// Any other JSON shape (booleans). Kept verbatim for diagnostics.
    Unrenderable(Value),
}

/// A timestamp string together with its UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValue {
    raw: String,
    date: NaiveDate,
}

impl DateValue {
    /// Parses `raw` when it contains a `T` separator and reads as a
    /// timestamp: RFC 3339 with an offset, or a naive date-time taken as UTC.
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.contains('T') {
            return None;
        }
        let utc = parse_timestamp(raw.trim())?;
        Some(Self {
            raw: raw.to_string(),
            date: utc.date_naive(),
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The `YYYY-MM-DD` text shown for this timestamp.
    pub fn display_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offsets without a colon (`+0200`) are common in backend dumps.
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Strings and numbers share one rendering branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
}

impl Scalar {
    /// Whether the value counts as present when used as an identifier.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => f.write_str(&format_number(n)),
        }
    }
}

/// Formats a number the way a browser prints it: integral floats lose
/// their fractional part (`3.0` shows as `3`), and magnitudes from `1e21`
/// up or below `1e-6` switch to exponent form (`1e+21`, `1.5e-7`).
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => format_float(f),
        None => n.to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        // `{:e}` already yields the shortest digits; only the sign of a
        // positive exponent differs.
        let sci = format!("{:e}", f);
        return match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => sci,
        };
    }
    f.to_string()
}

impl ViewValue {
    /// Classifies a JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ViewValue::Null,
            Value::String(s) => match DateValue::parse(s) {
                Some(date) => ViewValue::Date(date),
                None => ViewValue::Scalar(Scalar::Text(s.clone())),
            },
            Value::Number(n) => ViewValue::Scalar(Scalar::Number(n.clone())),
            Value::Array(items) => ViewValue::Array(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => ViewValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
            Value::Bool(_) => ViewValue::Unrenderable(value.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ViewValue::Null)
    }

    /// Looks up an object field. `None` for non-objects and absent keys.
    pub fn field(&self, key: &str) -> Option<&ViewValue> {
        match self {
            ViewValue::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// The identifier this value carries, if it is an object with a truthy
    /// `id` field.
    pub fn object_id(&self) -> Option<String> {
        match self.field("id")? {
            ViewValue::Scalar(s) if s.is_truthy() => Some(s.to_string()),
            ViewValue::Date(d) => Some(d.raw().to_string()),
            _ => None,
        }
    }

    /// Short description of the value's shape, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewValue::Date(_) => "date",
            ViewValue::Scalar(Scalar::Text(_)) => "string",
            ViewValue::Scalar(Scalar::Number(_)) => "number",
            ViewValue::Array(_) => "array",
            ViewValue::Object(_) => "object",
            ViewValue::Null => "null",
            ViewValue::Unrenderable(_) => "unrenderable",
        }
    }
}

impl From<&Value> for ViewValue {
    fn from(value: &Value) -> Self {
        ViewValue::from_json(value)
    }
}
