//! Outgoing SMS messages

use crate::{impl_record, impl_status};
use chrono::{DateTime, Utc};

impl_status!(MessageStatus, {
    Pending => "PENDING",
    Scheduled => "SCHEDULED",
    Sent => "SENT",
    Delivered => "DELIVERED",
    Failed => "FAILED",
});

impl_record!(
    Message,
    "messages",
    ["reference", "sender", "body", "recipient"],
    {
        reference: String,
        sender: String,
        recipient: String,
        body: String,
        status: MessageStatus,
        #[serde(default, deserialize_with = "crate::core::field::deserialize_lenient_datetime")]
        sent_at: Option<DateTime<Utc>>,
    }
);

impl Message {
    /// Whether the message left the platform
    pub fn is_sent(&self) -> bool {
        matches!(self.status, MessageStatus::Sent | MessageStatus::Delivered)
    }
}
