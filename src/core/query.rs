//! Filter, date-range and pagination state, plus the query-string form of a view

use crate::core::sort::SortState;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field-filter value meaning "no constraint"
///
/// Screens may configure an additional sentinel of their own (e.g. `"TOUS"`);
/// `"ALL"` and the empty string are always accepted.
pub const NO_CONSTRAINT: &str = "ALL";

/// Inclusive calendar-day range applied to a record's timestamp
///
/// `from` covers its whole day starting at `00:00:00.000` and `to` runs until
/// `23:59:59.999`, so picking the same day for both bounds selects that day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Range covering a single calendar day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(Some(date), Some(date))
    }

    /// No bound set: the date filter is inactive
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Lower bound as an instant, at the start of `from` in `offset`
    pub fn start(&self, offset: FixedOffset) -> Option<DateTime<Utc>> {
        let naive = self.from?.and_hms_milli_opt(0, 0, 0, 0)?;
        offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Upper bound as an instant, at the last millisecond of `to` in `offset`
    pub fn end(&self, offset: FixedOffset) -> Option<DateTime<Utc>> {
        let naive = self.to?.and_hms_milli_opt(23, 59, 59, 999)?;
        offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether `instant` falls inside the range
    pub fn contains(&self, instant: DateTime<Utc>, offset: FixedOffset) -> bool {
        let after_start = self.start(offset).is_none_or(|start| instant >= start);
        let before_end = self.end(offset).is_none_or(|end| instant <= end);
        after_start && before_end
    }
}

/// Everything that narrows the source collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text search, matched against the screen's search fields
    pub search_term: String,

    /// Exact-match filters by field name, in the order they were set
    pub field_filters: IndexMap<String, String>,

    /// Timestamp range
    pub date_range: DateRange,
}

impl FilterState {
    /// Search term as the search predicate sees it
    pub fn normalized_search(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    /// True when no filter constrains the result
    ///
    /// Only the global sentinels are considered here; screen-specific
    /// sentinels are resolved by the pipeline.
    pub fn is_identity(&self) -> bool {
        self.normalized_search().is_empty()
            && self.date_range.is_unbounded()
            && self
                .field_filters
                .values()
                .all(|v| is_unconstrained(v, None))
    }
}

/// Whether a field-filter value places no constraint
pub fn is_unconstrained(value: &str, sentinel: Option<&str>) -> bool {
    let value = value.trim();
    value.is_empty() || value == NO_CONSTRAINT || sentinel.is_some_and(|s| value == s)
}

/// Current page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,
}

impl PaginationState {
    /// Index of the first item on the page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }
}

/// View state as carried in a URL query string
///
/// Lets a screen restore its filters, sort and page from a link. All
/// parameters are optional; absent ones leave the current state untouched.
///
/// # Example
/// ```text
/// ?page=2&limit=10&search=awa
/// ?filter={"status": "OPEN"}&from=2024-05-01&to=2024-05-31&sort=created_at:desc
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ViewQuery {
    /// Page number (starts at 1; out-of-range values are clamped)
    pub page: Option<i64>,

    /// Number of items per page
    pub limit: Option<i64>,

    /// Free-text search term
    pub search: Option<String>,

    /// Exact-match filters as a JSON object
    ///
    /// # Format
    /// ```text
    /// filter={"status": "OPEN", "group_id": "…"}
    /// ```
    pub filter: Option<String>,

    /// Sort field and direction (`field`, `field:asc`, `field:desc`)
    pub sort: Option<String>,

    /// First day of the date range
    pub from: Option<NaiveDate>,

    /// Last day of the date range
    pub to: Option<NaiveDate>,
}

impl ViewQuery {
    /// Parse the filter JSON into field filters
    ///
    /// Invalid JSON or a non-object yields no filters. Scalar values are
    /// stringified; nested values are dropped.
    pub fn field_filters(&self) -> IndexMap<String, String> {
        let Some(raw) = self.filter.as_deref() else {
            return IndexMap::new();
        };

        let parsed = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(filter = %raw, "Ignoring malformed filter query parameter");
                return IndexMap::new();
            }
        };

        parsed
            .into_iter()
            .filter_map(|(field, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((field, text))
            })
            .collect()
    }

    /// Parse the sort expression, if any
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort.as_deref().and_then(|s| s.parse().ok())
    }

    /// Date range, when either bound is present
    pub fn date_range(&self) -> Option<DateRange> {
        if self.from.is_none() && self.to.is_none() {
            None
        } else {
            Some(DateRange::new(self.from, self.to))
        }
    }

    /// Whether the query touches any filter
    pub fn has_filters(&self) -> bool {
        self.search.is_some() || self.filter.is_some() || self.date_range().is_some()
    }
}
