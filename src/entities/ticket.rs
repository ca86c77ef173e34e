//! Support tickets

use crate::{impl_record, impl_status};

impl_status!(TicketStatus, {
    Open => "OPEN",
    InProgress => "IN_PROGRESS",
    Resolved => "RESOLVED",
    Closed => "CLOSED",
});

impl_status!(TicketPriority, {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
});

impl_record!(
    Ticket,
    "tickets",
    ["reference", "subject"],
    {
        reference: String,
        subject: String,
        status: TicketStatus,
        priority: TicketPriority,
    }
);
