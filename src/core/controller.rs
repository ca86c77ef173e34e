//! View controller: the single owner of a screen's list state
//!
//! The controller holds the raw collection plus filter, sort and pagination
//! state. Every setter ends by re-running the pipeline and paginator before
//! returning, so callers never observe a half-updated [`ViewSnapshot`].
//!
//! Page policy:
//! - filter and page-size changes reset to page 1
//! - source replacement and sort changes keep the page, clamped if needed
//!
//! # Example
//!
//! ```rust,ignore
//! let config = DashboardConfig::default_config();
//! let mut contacts = ViewController::<Contact>::for_screen(&config, "contacts")?;
//!
//! contacts.set_source_data(fetched);
//! contacts.set_search_term("awa");
//! let page = contacts.set_page(2);
//! println!("{} of {} contacts", page.items.len(), page.total_items);
//! ```

use crate::config::{DashboardConfig, ScreenConfig};
use crate::core::error::{ViewError, ViewResult};
use crate::core::pagination::{ViewSnapshot, paginate};
use crate::core::pipeline::{FieldConfig, pipeline};
use crate::core::query::{DateRange, FilterState, PaginationState, ViewQuery};
use crate::core::record::Record;
use crate::core::refresh::RefreshHandle;
use crate::core::sort::SortState;
use crate::core::source::{ClientContext, RecordSource};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Derived list view for one screen
#[derive(Debug, Clone)]
pub struct ViewController<T: Record> {
    config: ScreenConfig,
    fields: FieldConfig,
    source: Vec<T>,
    filter: FilterState,
    sort: SortState,
    pagination: PaginationState,
    filtered: Vec<T>,
    snapshot: ViewSnapshot<T>,
}

impl<T: Record> ViewController<T> {
    /// Create a controller with an empty collection
    ///
    /// Construction is the only place the controller raises: a page size of
    /// zero or any other invalid screen configuration is rejected here.
    pub fn new(config: ScreenConfig) -> ViewResult<Self> {
        if config.page_size == 0 {
            return Err(ViewError::InvalidPageSize {
                screen: config.name.clone(),
            });
        }
        config.validate()?;

        let fields = config.field_config();
        let sort = config.sort_state();
        let pagination = PaginationState {
            page: 1,
            page_size: config.page_size,
        };

        Ok(Self {
            snapshot: ViewSnapshot::empty(config.page_size),
            config,
            fields,
            source: Vec::new(),
            filter: FilterState::default(),
            sort,
            pagination,
            filtered: Vec::new(),
        })
    }

    /// Create a controller for a named screen of a dashboard configuration
    pub fn for_screen(config: &DashboardConfig, screen: &str) -> ViewResult<Self> {
        Self::new(config.screen(screen)?.clone())
    }

    // === Accessors ===

    /// Current page and totals
    pub fn snapshot(&self) -> &ViewSnapshot<T> {
        &self.snapshot
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Raw collection as last delivered by the data source
    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Full filtered and sorted sequence the pages are cut from
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    // === Source data ===

    /// Replace the raw collection
    ///
    /// Filters and sort are kept. The page only moves when the new data no
    /// longer reaches it, in which case it is clamped to the last page.
    pub fn set_source_data(&mut self, data: impl IntoIterator<Item = T>) -> &ViewSnapshot<T> {
        self.source = data.into_iter().collect();
        self.recompute()
    }

    /// Fetch once from `source` and replace the collection
    ///
    /// On failure the current state is left untouched.
    pub async fn refresh_from<S>(
        &mut self,
        source: &S,
        ctx: &ClientContext,
    ) -> ViewResult<&ViewSnapshot<T>>
    where
        S: RecordSource<T> + ?Sized,
    {
        match source.fetch_records(ctx).await {
            Ok(records) => Ok(self.set_source_data(records)),
            Err(err) => {
                tracing::warn!(screen = %self.config.name, error = %err, "Failed to load records");
                Err(ViewError::Source {
                    screen: self.config.name.clone(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// Apply data delivered by a background poller, if any
    ///
    /// Returns `true` when new data was applied.
    pub fn apply_refresh(&mut self, handle: &mut RefreshHandle<T>) -> bool {
        match handle.take_latest() {
            Some(records) => {
                self.set_source_data(records);
                true
            }
            None => false,
        }
    }

    // === Filters (reset to page 1) ===

    /// Set the free-text search term
    pub fn set_search_term(&mut self, term: impl Into<String>) -> &ViewSnapshot<T> {
        let term = term.into();
        if self.filter.search_term == term {
            return &self.snapshot;
        }
        self.filter.search_term = term;
        self.reset_and_recompute()
    }

    /// Set an exact-match filter; the sentinel or `"ALL"` lifts the constraint
    pub fn set_field_filter(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> &ViewSnapshot<T> {
        let field = field.into();
        let value = value.into();
        if self.filter.field_filters.get(&field) == Some(&value) {
            return &self.snapshot;
        }
        self.filter.field_filters.insert(field, value);
        self.reset_and_recompute()
    }

    /// Remove the filter on `field`
    pub fn clear_field_filter(&mut self, field: &str) -> &ViewSnapshot<T> {
        if self.filter.field_filters.shift_remove(field).is_none() {
            return &self.snapshot;
        }
        self.reset_and_recompute()
    }

    /// Set the date range
    pub fn set_date_range(&mut self, range: DateRange) -> &ViewSnapshot<T> {
        if self.filter.date_range == range {
            return &self.snapshot;
        }
        self.filter.date_range = range;
        self.reset_and_recompute()
    }

    /// Replace the whole filter state
    pub fn set_filter_state(&mut self, filter: FilterState) -> &ViewSnapshot<T> {
        if self.filter == filter {
            return &self.snapshot;
        }
        self.filter = filter;
        self.reset_and_recompute()
    }

    /// Drop search, field filters and date range
    pub fn clear_filters(&mut self) -> &ViewSnapshot<T> {
        self.set_filter_state(FilterState::default())
    }

    // === Sort (keeps the page) ===

    pub fn set_sort_state(&mut self, sort: SortState) -> &ViewSnapshot<T> {
        self.sort = sort;
        self.recompute()
    }

    /// Sort by `key`, flipping the direction if it is already the sort key
    pub fn toggle_sort(&mut self, key: &str) -> &ViewSnapshot<T> {
        let sort = self.sort.toggle(key, &self.fields.timestamp_field);
        self.set_sort_state(sort)
    }

    // === Pagination ===

    /// Go to page `page`
    ///
    /// Values below 1 mean page 1; values past the end are clamped to the
    /// last page.
    pub fn set_page(&mut self, page: i64) -> &ViewSnapshot<T> {
        self.pagination.page = normalize_page(page);
        self.recompute()
    }

    pub fn next_page(&mut self) -> &ViewSnapshot<T> {
        self.pagination.page = self.snapshot.page.saturating_add(1);
        self.recompute()
    }

    pub fn prev_page(&mut self) -> &ViewSnapshot<T> {
        self.pagination.page = self.snapshot.page.saturating_sub(1).max(1);
        self.recompute()
    }

    pub fn first_page(&mut self) -> &ViewSnapshot<T> {
        self.pagination.page = 1;
        self.recompute()
    }

    pub fn last_page(&mut self) -> &ViewSnapshot<T> {
        self.pagination.page = self.snapshot.total_pages;
        self.recompute()
    }

    /// Change the number of items per page and go back to page 1
    ///
    /// Values below 1 are ignored and the previous page size is kept.
    pub fn set_page_size(&mut self, page_size: i64) -> &ViewSnapshot<T> {
        match usize::try_from(page_size) {
            Ok(size) if size > 0 => {
                self.pagination.page_size = size;
                self.reset_and_recompute()
            }
            _ => {
                tracing::debug!(
                    screen = %self.config.name,
                    requested = page_size,
                    kept = self.pagination.page_size,
                    "Ignoring invalid page size"
                );
                self.recompute()
            }
        }
    }

    // === Query strings ===

    /// Restore view state from URL query parameters
    ///
    /// Filters, sort and page size are applied first (any filter or page-size
    /// change goes back to page 1), then the requested page.
    pub fn apply_query(&mut self, query: &ViewQuery) -> &ViewSnapshot<T> {
        let mut filter = self.filter.clone();
        if let Some(search) = &query.search {
            filter.search_term = search.clone();
        }
        if query.filter.is_some() {
            filter.field_filters = query.field_filters();
        }
        if let Some(range) = query.date_range() {
            filter.date_range = range;
        }

        let mut reset = filter != self.filter;
        self.filter = filter;

        if let Some(sort) = query.sort_state() {
            self.sort = sort;
        }

        if let Some(size) = query.limit.and_then(|l| usize::try_from(l).ok()).filter(|s| *s > 0) {
            reset |= size != self.pagination.page_size;
            self.pagination.page_size = size;
        }

        if reset {
            self.pagination.page = 1;
        }
        if let Some(page) = query.page {
            self.pagination.page = normalize_page(page);
        }

        self.recompute()
    }

    // === Recompute ===

    fn reset_and_recompute(&mut self) -> &ViewSnapshot<T> {
        self.pagination.page = 1;
        self.recompute()
    }

    /// Pipeline then paginator; the only place the snapshot is rebuilt
    fn recompute(&mut self) -> &ViewSnapshot<T> {
        self.filtered = pipeline(&self.source, &self.filter, &self.sort, &self.fields);
        self.snapshot = paginate(
            &self.filtered,
            self.pagination.page,
            self.pagination.page_size,
        );
        self.pagination.page = self.snapshot.page;

        tracing::debug!(
            screen = %self.config.name,
            source = self.source.len(),
            total_items = self.snapshot.total_items,
            total_pages = self.snapshot.total_pages,
            page = self.snapshot.page,
            "Recomputed view"
        );

        &self.snapshot
    }
}

impl<T: Record + DeserializeOwned> ViewController<T> {
    /// Replace the raw collection from an untyped backend payload
    ///
    /// Anything but a JSON array counts as an empty collection; array
    /// elements that do not decode as `T` are skipped.
    pub fn set_source_value(&mut self, value: Value) -> &ViewSnapshot<T> {
        let records = decode_records(&self.config.name, value);
        self.set_source_data(records)
    }
}

/// Decode a backend payload into records, never failing
pub fn decode_records<T: DeserializeOwned>(screen: &str, value: Value) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            tracing::warn!(
                screen = %screen,
                kind = json_kind(&other),
                "Source data is not an array; treating it as empty"
            );
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(
                    screen = %screen,
                    index,
                    error = %err,
                    "Skipping record that failed to decode"
                );
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn normalize_page(page: i64) -> usize {
    if page < 1 {
        1
    } else {
        usize::try_from(page).unwrap_or(usize::MAX)
    }
}
