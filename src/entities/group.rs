//! Contact groups

use crate::impl_record;

impl_record!(
    Group,
    "groups",
    ["name", "description"],
    {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        contact_count: u32,
    }
);
