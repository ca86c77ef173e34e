//! Paginator and the snapshot handed to the presentation layer

use serde::Serialize;

/// One page of a derived view
///
/// Recomputed from scratch whenever the view's inputs change; callers only
/// ever read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot<T> {
    /// Records on the current page
    pub items: Vec<T>,

    /// Total number of records after filters
    pub total_items: usize,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    /// Current page number (starts at 1, always within `1..=total_pages`)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl<T> ViewSnapshot<T> {
    /// Snapshot of an empty collection
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 1,
            page: 1,
            page_size: page_size.max(1),
            has_next: false,
            has_prev: false,
        }
    }

    /// 1-based position of the first item on the page, 0 when empty
    pub fn first_item_number(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item on the page, 0 when empty
    pub fn last_item_number(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + self.items.len()
        }
    }
}

/// Number of pages needed for `total_items`, never less than one
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `1..=total_pages`
///
/// Only reduces an out-of-range page; it never jumps back to page 1 on its own.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice a filtered, sorted collection into the requested page
pub fn paginate<T: Clone>(filtered_sorted: &[T], page: usize, page_size: usize) -> ViewSnapshot<T> {
    // Ensure page_size is at least 1 to avoid division by zero
    let page_size = page_size.max(1);
    let total_items = filtered_sorted.len();
    let total_pages = total_pages(total_items, page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    ViewSnapshot {
        items: filtered_sorted[start..end].to_vec(),
        total_items,
        total_pages,
        page,
        page_size,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}
