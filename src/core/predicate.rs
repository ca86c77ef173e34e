//! Record predicates
//!
//! Each predicate tests one record against one criterion. They never fail:
//! a malformed or missing field is simply "no match".

use crate::core::query::{DateRange, is_unconstrained};
use crate::core::record::Record;
use chrono::FixedOffset;

/// Case-insensitive substring search over `fields`
///
/// `term` must already be trimmed and lower-cased (see
/// [`FilterState::normalized_search`](crate::core::query::FilterState::normalized_search)).
/// An empty term matches everything.
pub fn matches_search<T: Record, S: AsRef<str>>(record: &T, term: &str, fields: &[S]) -> bool {
    if term.is_empty() {
        return true;
    }

    fields.iter().any(|field| {
        record
            .field_value(field.as_ref())
            .and_then(|v| v.search_text())
            .is_some_and(|text| text.to_lowercase().contains(term))
    })
}

/// Exact match of `field` against `value`
///
/// Empty values, `"ALL"` and the screen's `sentinel` place no constraint.
/// Fields without a canonical text form (floats, dates, null) never match.
pub fn matches_field<T: Record>(
    record: &T,
    field: &str,
    value: &str,
    sentinel: Option<&str>,
) -> bool {
    if is_unconstrained(value, sentinel) {
        return true;
    }

    let expected = value.trim();
    record
        .field_value(field)
        .and_then(|v| v.filter_text())
        .is_some_and(|actual| actual == expected)
}

/// Inclusive date range over the timestamp stored in `timestamp_field`
///
/// With no bound set every record passes, including those without a
/// timestamp. With a bound, records whose timestamp is missing or
/// unparsable are excluded.
pub fn matches_date_range<T: Record>(
    record: &T,
    timestamp_field: &str,
    range: &DateRange,
    offset: FixedOffset,
) -> bool {
    if range.is_unbounded() {
        return true;
    }

    record
        .timestamp(timestamp_field)
        .is_some_and(|ts| range.contains(ts, offset))
}
