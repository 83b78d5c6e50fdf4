//! Generic data values as loaded from event data files.
//!
//! [`Value`] mirrors the structure produced by a YAML parser (mappings,
//! sequences, scalars) with one addition: dates and datetimes are native
//! variants rather than strings. The sort key logic branches on that
//! distinction, so [`Value::from_yaml`] recognises YAML timestamps while
//! converting.
//!
//! # Example
//!
//! ```
//! use ftwhub_core::value::Value;
//!
//! let value = Value::from_yaml_str("start: 2024-05-03\ntitle: Tanzabend").unwrap();
//! let map = value.as_mapping().unwrap();
//! assert!(matches!(map.get("start"), Some(Value::Date(_))));
//! assert_eq!(map.get("title").and_then(Value::as_str), Some("Tanzabend"));
//! ```

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// An insertion-ordered mapping from string keys to values.
pub type Map = IndexMap<String, Value>;

/// `YYYY-MM-DD`
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("Invalid date regex")
});

/// YAML 1.1 timestamp: date, `T`/`t`/blanks, time with seconds, optional
/// fraction and optional zone (`Z`, `+h`, `+hh`, `+hhmm`, `+hh:mm`).
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[Tt]|[ \t]+)(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d*))?(?:[ \t]*(Z|[-+]\d{1,2}(?::?\d{2})?))?$",
    )
    .expect("Invalid timestamp regex")
});

/// A deserialized data value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A bare calendar date.
    Date(NaiveDate),
    /// A full timestamp. Zoned timestamps are stored as UTC wall-clock time.
    DateTime(NaiveDateTime),
    Sequence(Vec<Value>),
    Mapping(Map),
}

impl Value {
    /// Parses a single YAML document into a value.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::Null);
        }
        let raw: serde_yaml::Value = serde_yaml::from_str(text)?;
        Ok(Self::from_yaml(raw))
    }

    /// Converts a `serde_yaml` value, turning timestamp-shaped strings into
    /// [`Value::Date`] / [`Value::DateTime`].
    pub fn from_yaml(raw: serde_yaml::Value) -> Self {
        match raw {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => parse_timestamp(&s).unwrap_or(Self::String(s)),
            serde_yaml::Value::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from_yaml).collect())
            }
            serde_yaml::Value::Mapping(mapping) => {
                let mut map = Map::with_capacity(mapping.len());
                for (key, value) in mapping {
                    match mapping_key(&key) {
                        Some(key) => {
                            map.insert(key, Self::from_yaml(value));
                        }
                        None => warn!(?key, "Skipping non-scalar mapping key"),
                    }
                }
                Self::Mapping(map)
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }

    /// Returns the inner mapping, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the inner sequence, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the inner string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Truthiness as used for flags and link URLs: null, `false`, zero and
    /// empty containers are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Date(_) | Self::DateTime(_) => true,
            Self::Sequence(items) => !items.is_empty(),
            Self::Mapping(map) => !map.is_empty(),
        }
    }

    /// Renders a scalar as text. Null and containers have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Date(d) => Some(d.to_string()),
            Self::DateTime(dt) => Some(dt.to_string()),
        }
    }

    /// A short name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Mapping(map)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// Stringifies a scalar YAML mapping key.
fn mapping_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => mapping_key(&tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}

/// Recognises YAML timestamps. Returns `None` for anything that is not a
/// valid date or timestamp so the caller keeps the plain string.
fn parse_timestamp(s: &str) -> Option<Value> {
    if let Some(caps) = DATE_REGEX.captures(s) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        return Some(Value::Date(date));
    }

    let caps = TIMESTAMP_REGEX.captures(s)?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    let nanos = match caps.get(7) {
        Some(fraction) => fraction_to_nanos(fraction.as_str())?,
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(
        caps[4].parse().ok()?,
        caps[5].parse().ok()?,
        caps[6].parse().ok()?,
        nanos,
    )?;
    let local = date.and_time(time);

    match caps.get(8) {
        Some(zone) => Some(Value::DateTime(local - zone_offset(zone.as_str())?)),
        None => Some(Value::DateTime(local)),
    }
}

/// `"5"` → 500_000_000; digits beyond nanosecond precision are dropped.
fn fraction_to_nanos(fraction: &str) -> Option<u32> {
    if fraction.is_empty() {
        return Some(0);
    }
    let digits: String = fraction.chars().take(9).collect();
    let value: u32 = digits.parse().ok()?;
    Some(value * 10u32.pow(9 - digits.len() as u32))
}

fn zone_offset(zone: &str) -> Option<Duration> {
    if zone == "Z" {
        return Some(Duration::zero());
    }
    let (sign, rest) = zone.split_at(1);
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() > 2 => rest.split_at(rest.len() - 2),
        None => (rest, "0"),
    };
    let offset = Duration::hours(hours.parse().ok()?) + Duration::minutes(minutes.parse().ok()?);
    Some(if sign == "-" { -offset } else { offset })
}
