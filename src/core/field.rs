//! Field value types, lenient timestamp parsing and sort ordering

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Interpret the value as a point in time
    ///
    /// `DateTime` values are returned as-is and strings go through
    /// [`parse_timestamp`]. Everything else has no timestamp.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::String(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Canonical text used for exact-match filters
    ///
    /// Only scalar identifiers have one: strings, integers, booleans and UUIDs.
    pub fn filter_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Uuid(u) => Some(u.to_string()),
            FieldValue::Float(_) | FieldValue::DateTime(_) | FieldValue::Null => None,
        }
    }

    /// Text searched by the free-text search box
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::DateTime(dt) => Some(dt.to_rfc3339()),
            other => other.filter_text(),
        }
    }

    /// Convert a JSON value into a field value
    ///
    /// Arrays and objects have no scalar form and map to `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::Null,
        }
    }

    /// Ordering used by sort strategies
    ///
    /// Values are first ranked by kind: numbers, then timestamps (string
    /// timestamps included), text, booleans, UUIDs and finally nulls. Within a
    /// rank numbers compare exactly, timestamps chronologically and text with
    /// [`compare_text`]. The result is a total order for any mix of kinds.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    fn sort_key(&self) -> SortKey<'_> {
        match self {
            FieldValue::Integer(i) => SortKey::Number(Number::Int(*i)),
            FieldValue::Float(f) => SortKey::Number(Number::Float(*f)),
            FieldValue::DateTime(dt) => SortKey::Time(*dt),
            FieldValue::String(s) => match parse_timestamp(s) {
                Some(dt) => SortKey::Time(dt),
                None => SortKey::Text(Folded(s)),
            },
            FieldValue::Boolean(b) => SortKey::Bool(*b),
            FieldValue::Uuid(u) => SortKey::Uuid(*u),
            FieldValue::Null => SortKey::Null,
        }
    }
}

/// Sort key of a field value; variant order is the rank order
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Number(Number),
    Time(DateTime<Utc>),
    Text(Folded<'a>),
    Bool(bool),
    Uuid(Uuid),
    Null,
}

/// Text compared with [`compare_text`]
#[derive(Debug, PartialEq, Eq)]
struct Folded<'a>(&'a str);

impl PartialOrd for Folded<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Folded<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_text(self.0, other.0)
    }
}

/// Integer or float compared by exact numeric value
///
/// NaN sorts after every other number and equals any other NaN.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            },
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
        }
    }
}

/// Exact comparison of an integer with a float, without rounding the integer
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63 is exactly representable; every i64 is below it
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() || float >= TWO_POW_63 {
        return Ordering::Less;
    }
    if float < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    // In range, so the cast is exact
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)).unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

/// Case-insensitive comparison that ignores accents
///
/// Text is decomposed (NFD), combining marks are dropped and the rest is
/// lower-cased, so "Élodie" sorts next to "elodie" and before "Zoé". Ties
/// fall back to the original text.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    fold_text(a).cmp(&fold_text(b)).then_with(|| a.cmp(b))
}

/// Accent- and case-folded form of `text` used for sorting
pub fn fold_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a backend timestamp leniently
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (read as
/// UTC) and bare `YYYY-MM-DD` (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde helper: deserialize an optional timestamp, mapping garbage to `None`
///
/// Backends occasionally send empty strings or localized dates. Those records
/// must still load; they simply carry no timestamp.
pub fn deserialize_lenient_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                tracing::debug!(raw = %s, "Discarding unparsable timestamp");
            }
            parsed
        }
        _ => None,
    })
}

/// Conversion of record fields into [`FieldValue`]
///
/// Implemented for the primitive types records are built from; domain enums
/// implement it by exposing their wire name.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ToFieldValue for &str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String((*self).to_string())
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl ToFieldValue for i32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for u32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ToFieldValue for Uuid {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}
