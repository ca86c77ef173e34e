//! # dashview
//!
//! Derived list views for a telecom client dashboard.
//!
//! Every list screen (contacts, groups, messages, tickets, credit orders,
//! invoices) shows a collection fetched from a backend through the same
//! pipeline: search, exact-match filters and a date range, then a stable
//! sort, then pagination.
//!
//! ## Features
//!
//! - **One controller for every screen**: [`ViewController`](core::ViewController) is generic over the record type
//! - **Consistent snapshots**: every setter recomputes before returning
//! - **Reset vs. clamp**: filter changes go back to page 1, data refreshes keep a valid page
//! - **Configuration-Based**: screens are described in YAML
//! - **Background refresh**: a tokio poller delivers the latest data
//! - **Lenient data**: malformed fields are excluded, never fatal
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashview::prelude::*;
//!
//! let config = DashboardConfig::default_config();
//! let mut tickets = ViewController::<Ticket>::for_screen(&config, "tickets")?;
//!
//! tickets.set_source_data(fetched_tickets);
//! tickets.set_field_filter("status", "OPEN");
//! tickets.toggle_sort("priority");
//!
//! let page = tickets.snapshot();
//! println!("page {}/{}", page.page, page.total_pages);
//! ```

extern crate self as dashview;

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        controller::ViewController,
        error::{ConfigError, ViewError, ViewResult},
        field::{FieldValue, ToFieldValue},
        pagination::ViewSnapshot,
        pipeline::FieldConfig,
        query::{DateRange, FilterState, PaginationState, ViewQuery},
        record::Record,
        refresh::{RefreshHandle, RefreshPoller},
        sort::{SortDirection, SortState},
        source::{ClientContext, RecordSource},
    };

    // === Macros ===
    pub use crate::{impl_record, impl_status};

    // === Records ===
    pub use crate::entities::{
        Contact, CreditOrder, CreditOrderStatus, Group, Invoice, InvoiceStatus, Message,
        MessageStatus, Ticket, TicketPriority, TicketStatus,
    };

    // === Storage ===
    pub use crate::storage::InMemoryRecordSource;

    // === Config ===
    pub use crate::config::{DashboardConfig, FilterFieldConfig, ScreenConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
