//! Filter/sort pipeline: raw collection to filtered, sorted collection

use crate::core::predicate::{matches_date_range, matches_field, matches_search};
use crate::core::query::FilterState;
use crate::core::record::{DEFAULT_TIMESTAMP_FIELD, Record};
use crate::core::sort::{SortState, sort_records};
use chrono::{FixedOffset, Offset, Utc};
use std::collections::HashMap;

/// Per-screen knowledge the pipeline needs about record fields
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Fields matched by the search box; empty means `Record::indexed_fields`
    pub search_fields: Vec<String>,

    /// Screen-specific "no constraint" value per filter field
    pub sentinels: HashMap<String, String>,

    /// Field holding the record timestamp
    pub timestamp_field: String,

    /// Offset whose calendar days the date range refers to
    pub utc_offset: FixedOffset,
}

impl FieldConfig {
    pub fn new(timestamp_field: impl Into<String>) -> Self {
        Self {
            search_fields: Vec::new(),
            sentinels: HashMap::new(),
            timestamp_field: timestamp_field.into(),
            utc_offset: utc(),
        }
    }

    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sentinel(mut self, field: impl Into<String>, sentinel: impl Into<String>) -> Self {
        self.sentinels.insert(field.into(), sentinel.into());
        self
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn sentinel(&self, field: &str) -> Option<&str> {
        self.sentinels.get(field).map(String::as_str)
    }

    /// Search fields for `T`, falling back to its indexed fields
    pub fn search_fields_for<T: Record>(&self) -> Vec<&str> {
        if self.search_fields.is_empty() {
            T::indexed_fields().to_vec()
        } else {
            self.search_fields.iter().map(String::as_str).collect()
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FIELD)
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Whether `record` passes every active filter in `filter`
///
/// Search, each field filter and the date range are ANDed. They are
/// independent, so their order does not matter.
pub fn matches_filters<T: Record>(record: &T, filter: &FilterState, fields: &FieldConfig) -> bool {
    let term = filter.normalized_search();
    matches_search(record, &term, &fields.search_fields_for::<T>())
        && filter
            .field_filters
            .iter()
            .all(|(field, value)| matches_field(record, field, value, fields.sentinel(field)))
        && matches_date_range(
            record,
            &fields.timestamp_field,
            &filter.date_range,
            fields.utc_offset,
        )
}

/// Apply filters to a collection of records
///
/// The source is left untouched; matching records are cloned in input order.
pub fn apply_filters<T: Record>(source: &[T], filter: &FilterState, fields: &FieldConfig) -> Vec<T> {
    let term = filter.normalized_search();
    let search_fields = fields.search_fields_for::<T>();

    source
        .iter()
        .filter(|record| matches_search(*record, &term, &search_fields))
        .filter(|record| {
            filter
                .field_filters
                .iter()
                .all(|(field, value)| matches_field(*record, field, value, fields.sentinel(field)))
        })
        .filter(|record| {
            matches_date_range(
                *record,
                &fields.timestamp_field,
                &filter.date_range,
                fields.utc_offset,
            )
        })
        .cloned()
        .collect()
}

/// Apply sorting to a collection of records
pub fn apply_sort<T: Record>(mut data: Vec<T>, sort: &SortState, fields: &FieldConfig) -> Vec<T> {
    sort_records(&mut data, sort, &fields.timestamp_field);
    data
}

/// Filter then sort: the full derived sequence a screen paginates over
pub fn pipeline<T: Record>(
    source: &[T],
    filter: &FilterState,
    sort: &SortState,
    fields: &FieldConfig,
) -> Vec<T> {
    apply_sort(apply_filters(source, filter, fields), sort, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::DateRange;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    fn messages() -> Vec<Value> {
        vec![
            json!({"id": "m1", "sender": "ACME", "body": "Promo -20%", "status": "SENT", "created_at": "2024-06-01T09:00:00Z"}),
            json!({"id": "m2", "sender": "Shop", "body": "Your code: 1234", "status": "FAILED", "created_at": "2024-06-02T10:00:00Z"}),
            json!({"id": "m3", "sender": "ACME", "body": "Flash sale", "status": "SENT", "created_at": "2024-06-02T18:00:00Z"}),
            json!({"id": "m4", "sender": "acme", "body": "Reminder", "status": "PENDING", "created_at": "broken"}),
            json!({"id": "m5", "sender": "Bank", "body": "OTP 9981", "status": "SENT", "created_at": "2024-06-03T07:00:00Z"}),
        ]
    }

    fn fields() -> FieldConfig {
        FieldConfig::default()
            .with_search_fields(["sender", "body"])
            .with_sentinel("status", "TOUS")
    }

    fn keys(records: &[Value]) -> Vec<String> {
        records.iter().map(|r| r.key()).collect()
    }

    #[test]
    fn test_identity_filter_sorts_newest_first() {
        let result = pipeline(&messages(), &FilterState::default(), &SortState::default(), &fields());
        assert_eq!(keys(&result), vec!["m5", "m3", "m2", "m1", "m4"]);
    }

    #[test]
    fn test_filters_are_anded() {
        let mut filter = FilterState {
            search_term: "  AcMe ".into(),
            ..Default::default()
        };
        filter.field_filters.insert("status".into(), "SENT".into());

        let result = pipeline(&messages(), &filter, &SortState::default(), &fields());
        assert_eq!(keys(&result), vec!["m3", "m1"]);
    }

    #[test]
    fn test_sentinel_disables_field_filter() {
        let mut filter = FilterState::default();
        filter.field_filters.insert("status".into(), "TOUS".into());

        let result = pipeline(&messages(), &filter, &SortState::default(), &fields());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_date_range_excludes_broken_timestamps() {
        let filter = FilterState {
            date_range: DateRange::day(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
            ..Default::default()
        };

        let result = pipeline(&messages(), &filter, &SortState::default(), &fields());
        assert_eq!(keys(&result), vec!["m3", "m2"]);
    }

    #[test]
    fn test_matches_filters_agrees_with_apply_filters() {
        let mut filter = FilterState {
            search_term: "a".into(),
            ..Default::default()
        };
        filter.field_filters.insert("status".into(), "SENT".into());

        let source = messages();
        let expected = apply_filters(&source, &filter, &fields());
        let by_predicate: Vec<Value> = source
            .iter()
            .filter(|r| matches_filters(*r, &filter, &fields()))
            .cloned()
            .collect();
        assert_eq!(expected, by_predicate);
    }

    #[test]
    fn test_pipeline_is_idempotent_and_pure() {
        let source = messages();
        let before = source.clone();
        let sort = SortState::asc("sender");

        let once = pipeline(&source, &FilterState::default(), &sort, &fields());
        let twice = pipeline(&once, &FilterState::default(), &sort, &fields());
        assert_eq!(once, twice);
        assert_eq!(source, before);
    }

    #[test]
    fn test_search_falls_back_to_indexed_fields() {
        // serde_json::Value has no indexed fields: an empty search list
        // means a non-empty term matches nothing.
        let filter = FilterState {
            search_term: "acme".into(),
            ..Default::default()
        };
        let result = pipeline(&messages(), &filter, &SortState::default(), &FieldConfig::default());
        assert!(result.is_empty());
    }
}
