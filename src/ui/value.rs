//! Cell values and their display form.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use super::time::{format_time_at, to_datetime};

/// Suffix marking columns that hold Unix timestamps.
pub const TIME_SUFFIX: &str = "_time";

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Seconds since the Unix epoch.
    Timestamp(i64),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Timestamp(_))
    }

    /// The value as seconds, if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            Self::Int(n) | Self::Timestamp(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Null | Self::Bool(_) | Self::Str(_) => None,
        }
    }

    /// Key for style lookup. Floats and nulls have none.
    #[must_use]
    pub fn style_key(&self) -> Option<StyleKey> {
        match self {
            Self::Str(s) => Some(StyleKey::Str(s.clone())),
            Self::Int(n) | Self::Timestamp(n) => Some(StyleKey::Int(*n)),
            Self::Bool(b) => Some(StyleKey::Bool(*b)),
            Self::Float(_) | Self::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) | Self::Timestamp(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Timestamp(dt.timestamp())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Str(n.to_string())),
            Json::String(s) => Self::Str(s),
            other => Self::Str(other.to_string()),
        }
    }
}

/// Comparable subset of [`Value`] usable as a style-map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for StyleKey {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for StyleKey {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for StyleKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for StyleKey {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One table record: column identifier to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, Value>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(column.into(), value.into());
    }

    /// The cell for `column`; missing cells read as null.
    #[must_use]
    pub fn get(&self, column: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[must_use]
pub fn is_time_column(column: &str) -> bool {
    column.ends_with(TIME_SUFFIX)
}

/// Display form of a cell, using the wall clock for time columns.
#[must_use]
pub fn format_value(column: &str, value: &Value) -> String {
    format_value_at(column, value, Utc::now())
}

/// Display form of a cell relative to `now`.
///
/// Time columns render numeric values as "time ago". Booleans read
/// yes/no in every column; other values, and timestamps outside the
/// calendar range, keep their plain text.
#[must_use]
pub fn format_value_at(column: &str, value: &Value, now: DateTime<Utc>) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => (if *b { "yes" } else { "no" }).to_string(),
        v if is_time_column(column) => match v.as_seconds() {
            Some(ts) if to_datetime(ts).is_some() => format_time_at(ts, now),
            _ => v.to_string(),
        },
        v => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn null_is_blank() {
        assert_eq!(format_value_at("name", &Value::Null, now()), "");
        assert_eq!(format_value_at("seen_time", &Value::Null, now()), "");
    }

    #[test]
    fn booleans_read_yes_no() {
        assert_eq!(format_value_at("enabled", &true.into(), now()), "yes");
        assert_eq!(format_value_at("enabled", &false.into(), now()), "no");
    }

    #[test]
    fn time_columns_render_relative() {
        let ts = Value::Int(1_700_000_000 - 120);
        assert_eq!(format_value_at("created_time", &ts, now()), "2m ago");
        assert_eq!(format_value_at("created", &ts, now()), "1699999880");
    }

    #[test]
    fn text_in_time_column_falls_back() {
        let v = Value::from("never");
        assert_eq!(format_value_at("last_time", &v, now()), "never");
    }

    #[test]
    fn booleans_read_yes_no_in_time_columns() {
        assert_eq!(format_value_at("done_time", &true.into(), now()), "yes");
        assert_eq!(format_value_at("done_time", &false.into(), now()), "no");
    }

    #[test]
    fn out_of_range_timestamps_keep_exact_digits() {
        let v = Value::Int(123_456_789_012_345_678);
        assert_eq!(format_value_at("x_time", &v, now()), "123456789012345678");
        let v = Value::Timestamp(i64::MAX);
        assert_eq!(format_value_at("x_time", &v, now()), i64::MAX.to_string());
    }

    #[test]
    fn plain_values_use_display() {
        assert_eq!(format_value_at("n", &42.into(), now()), "42");
        assert_eq!(format_value_at("x", &2.5.into(), now()), "2.5");
        assert_eq!(format_value_at("s", &"abc".into(), now()), "abc");
    }

    #[test]
    fn floats_have_no_style_key() {
        assert_eq!(Value::Float(1.0).style_key(), None);
        assert_eq!(Value::Null.style_key(), None);
        assert_eq!(Value::Int(3).style_key(), Some(StyleKey::Int(3)));
        assert_eq!(
            Value::from("ok").style_key(),
            Some(StyleKey::Str("ok".into()))
        );
    }

    #[test]
    fn missing_cells_read_null() {
        let row = Row::new().with("name", "x");
        assert_eq!(row.get("name"), &Value::from("x"));
        assert!(row.get("other").is_null());
    }

    #[test]
    fn json_values_convert() {
        let v: serde_json::Value = serde_json::json!({"a": 1, "b": 1.5, "c": null, "d": [1]});
        assert_eq!(Value::from(v["a"].clone()), Value::Int(1));
        assert_eq!(Value::from(v["b"].clone()), Value::Float(1.5));
        assert_eq!(Value::from(v["c"].clone()), Value::Null);
        assert_eq!(Value::from(v["d"].clone()), Value::Str("[1]".into()));
    }
}
