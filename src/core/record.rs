//! Record trait: the abstraction every list screen item implements

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Timestamp field used when a screen does not name one
pub const DEFAULT_TIMESTAMP_FIELD: &str = "created_at";

/// Base trait for every item shown in a list screen.
///
/// A record has:
/// - a key identifying it within its collection
/// - named fields, exposed as [`FieldValue`]s for search, filters and sorting
/// - a timestamp, read from a configurable field (see [`Record::timestamp`])
///
/// Fetching records is handled separately via [`RecordSource`](crate::core::source::RecordSource)
/// so a record stays plain data.
pub trait Record: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "contacts", "tickets")
    fn resource_name() -> &'static str;

    /// Fields searched when a screen configures no search fields of its own
    fn indexed_fields() -> &'static [&'static str] {
        &[]
    }

    /// Identifying key of this record
    fn key(&self) -> String;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Get the timestamp stored in `field`
    ///
    /// Missing and unparsable values both yield `None`.
    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.field_value(field).and_then(|v| v.as_datetime())
    }
}

/// Untyped records straight from a backend payload.
///
/// Fields are top-level keys; a dotted name (`client.name`) walks nested
/// objects. The key is the `id` field.
impl Record for Value {
    fn resource_name() -> &'static str {
        "records"
    }

    fn key(&self) -> String {
        match self.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = if field.contains('.') {
            let pointer = format!("/{}", field.replace('.', "/"));
            self.pointer(&pointer)
        } else {
            self.get(field)
        }?;
        Some(FieldValue::from_json(value))
    }
}
