//! Sort state and the stable record comparator

use crate::core::field::FieldValue;
use crate::core::record::{DEFAULT_TIMESTAMP_FIELD, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordering direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (smallest first)
    Asc,
    /// Descending order (largest first)
    #[default]
    Desc,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sort field and direction
///
/// # Format
/// - `field` or `field:asc` (ascending)
/// - `field:desc` (descending)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    /// Most recent first on the given timestamp field
    pub fn newest_first(timestamp_field: impl Into<String>) -> Self {
        Self::new(timestamp_field, SortDirection::Desc)
    }

    /// Sort state after the user selects the `key` column
    ///
    /// Selecting the active key flips its direction. A new key starts
    /// ascending, except the timestamp field which starts newest first.
    pub fn toggle(&self, key: &str, timestamp_field: &str) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reverse())
        } else if key == timestamp_field {
            Self::newest_first(key)
        } else {
            Self::asc(key)
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::newest_first(DEFAULT_TIMESTAMP_FIELD)
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.key, direction)
    }
}

/// Error returned when a sort expression cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort expression '{0}'")]
pub struct ParseSortError(pub String);

impl FromStr for SortState {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.trim().split_once(':') {
            Some((key, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    _ => return Err(ParseSortError(s.to_string())),
                };
                (key.trim(), direction)
            }
            None => (s.trim(), SortDirection::Asc),
        };

        if key.is_empty() {
            return Err(ParseSortError(s.to_string()));
        }
        Ok(Self::new(key, direction))
    }
}

/// Compare two records under `sort`
///
/// When the key is the screen's timestamp field, values compare as instants
/// and unparsable timestamps count as missing. Missing or null keys sort
/// after every present key in both directions.
pub fn compare_records<T: Record>(
    a: &T,
    b: &T,
    sort: &SortState,
    timestamp_field: &str,
) -> Ordering {
    if sort.key == timestamp_field {
        let (ta, tb) = (a.timestamp(&sort.key), b.timestamp(&sort.key));
        return missing_last(ta.as_ref(), tb.as_ref(), |x, y| {
            sort.direction.apply(x.cmp(y))
        });
    }

    let va = a.field_value(&sort.key).filter(|v| !v.is_null());
    let vb = b.field_value(&sort.key).filter(|v| !v.is_null());
    missing_last(va.as_ref(), vb.as_ref(), |x: &FieldValue, y| {
        sort.direction.apply(x.sort_cmp(y))
    })
}

fn missing_last<V>(a: Option<&V>, b: Option<&V>, cmp: impl Fn(&V, &V) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort records in place
///
/// `slice::sort_by` is a stable merge sort: records comparing equal keep
/// their input order.
pub fn sort_records<T: Record>(records: &mut [T], sort: &SortState, timestamp_field: &str) {
    records.sort_by(|a, b| compare_records(a, b, sort, timestamp_field));
}
