//! Client invoices

use crate::{impl_record, impl_status};
use chrono::{DateTime, Utc};

impl_status!(InvoiceStatus, {
    Unpaid => "UNPAID",
    Paid => "PAID",
    Overdue => "OVERDUE",
});

impl_record!(
    Invoice,
    "invoices",
    ["number"],
    {
        number: String,
        amount: f64,
        status: InvoiceStatus,
        #[serde(default, deserialize_with = "crate::core::field::deserialize_lenient_datetime")]
        issued_at: Option<DateTime<Utc>>,
    }
);
