//! SMS credit purchase orders

use crate::{impl_record, impl_status};

impl_status!(CreditOrderStatus, {
    Pending => "PENDING",
    Paid => "PAID",
    Cancelled => "CANCELLED",
    Rejected => "REJECTED",
});

impl_record!(
    CreditOrder,
    "credit_orders",
    ["reference", "payment_method"],
    {
        reference: String,
        credits: i64,
        amount: f64,
        payment_method: String,
        status: CreditOrderStatus,
    }
);
