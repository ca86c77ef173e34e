//! Core module containing the view pipeline and its building blocks

pub mod controller;
pub mod error;
pub mod field;
pub mod pagination;
pub mod pipeline;
pub mod predicate;
pub mod query;
pub mod record;
pub mod refresh;
pub mod sort;
pub mod source;

pub use controller::ViewController;
pub use error::{ConfigError, ViewError, ViewResult};
pub use field::{FieldValue, ToFieldValue};
pub use pagination::{ViewSnapshot, paginate};
pub use pipeline::{FieldConfig, pipeline};
pub use query::{DateRange, FilterState, PaginationState, ViewQuery};
pub use record::Record;
pub use refresh::{RefreshHandle, RefreshPoller};
pub use sort::{SortDirection, SortState};
pub use source::{ClientContext, RecordSource};
