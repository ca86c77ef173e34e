//! Typed records for the stock dashboard screens
//!
//! Each record is declared with [`impl_record!`](crate::impl_record), which
//! generates the struct, its [`Record`](crate::core::record::Record) impl and
//! a `new` constructor. Screens can equally run on raw `serde_json::Value`
//! records when no typed model exists.

pub mod macros;

pub mod contact;
pub mod credit_order;
pub mod group;
pub mod invoice;
pub mod message;
pub mod ticket;

pub use contact::Contact;
pub use credit_order::{CreditOrder, CreditOrderStatus};
pub use group::Group;
pub use invoice::{Invoice, InvoiceStatus};
pub use message::{Message, MessageStatus};
pub use ticket::{Ticket, TicketPriority, TicketStatus};
