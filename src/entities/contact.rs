//! Address-book contacts

use crate::impl_record;
use uuid::Uuid;

impl_record!(
    Contact,
    "contacts",
    ["name", "number"],
    {
        name: String,
        number: String,
        #[serde(default)]
        group_id: Option<Uuid>,
        #[serde(default)]
        email: Option<String>,
    }
);

impl Contact {
    /// Attach the contact to a group
    pub fn in_group(mut self, group_id: Uuid) -> Self {
        self.group_id = Some(group_id);
        self
    }
}
