//! Macros for reducing boilerplate when defining dashboard records
//!
//! These macros generate the repetitive struct and trait implementations
//! needed for each record type shown in a list screen.

/// Complete macro to create a record type with automatic trait implementations
///
/// Every generated record has an `id` and a lenient `created_at` timestamp
/// (missing or unparsable values become `None`). Each listed field is exposed
/// by name through [`Record::field_value`](crate::core::record::Record::field_value),
/// so field types must implement [`ToFieldValue`](crate::core::field::ToFieldValue).
///
/// # Example
///
/// ```rust,ignore
/// use dashview::prelude::*;
///
/// impl_record!(
///     Contact,
///     "contacts",
///     ["name", "number"],
///     {
///         name: String,
///         number: String,
///         group_id: Option<Uuid>,
///     }
/// );
///
/// let contact = Contact::new("Awa Diop".to_string(), "+221770000000".to_string(), None);
/// assert_eq!(contact.field_value("name"), Some(FieldValue::String("Awa Diop".into())));
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $type:ident,
        $resource:expr,
        [ $( $indexed_field:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this record
            pub id: ::uuid::Uuid,

            /// When this record was created
            #[serde(default, deserialize_with = "::dashview::core::field::deserialize_lenient_datetime")]
            pub created_at: Option<::chrono::DateTime<::chrono::Utc>>,

            $( $(#[$field_meta])* pub $specific_field : $specific_type ),*
        }

        impl $crate::core::record::Record for $type {
            fn resource_name() -> &'static str {
                $resource
            }

            fn indexed_fields() -> &'static [&'static str] {
                &[ $( $indexed_field ),* ]
            }

            fn key(&self) -> String {
                self.id.to_string()
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::ToFieldValue;
                match field {
                    "id" => Some(self.id.to_field_value()),
                    "created_at" => Some(self.created_at.to_field_value()),
                    $( stringify!($specific_field) => Some(self.$specific_field.to_field_value()), )*
                    _ => None,
                }
            }
        }

        impl $type {
            /// Create a new record stamped with the current time
            pub fn new( $( $specific_field: $specific_type ),* ) -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    created_at: Some(::chrono::Utc::now()),
                    $( $specific_field ),*
                }
            }

            /// Override the creation timestamp
            pub fn with_created_at(mut self, created_at: ::chrono::DateTime<::chrono::Utc>) -> Self {
                self.created_at = Some(created_at);
                self
            }
        }
    };
}

/// Macro to declare a status-like enum carried by records
///
/// Variants serialize as their wire name, and the enum exposes that name
/// to filters and sorting as a string field value.
///
/// # Example
///
/// ```rust,ignore
/// impl_status!(TicketStatus, {
///     Open => "OPEN",
///     Closed => "CLOSED",
/// });
///
/// assert_eq!(TicketStatus::Open.as_str(), "OPEN");
/// assert_eq!("CLOSED".parse::<TicketStatus>().unwrap(), TicketStatus::Closed);
/// ```
#[macro_export]
macro_rules! impl_status {
    (
        $type:ident,
        { $( $variant:ident => $wire:literal ),+ $(,)? }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $type {
            $( #[serde(rename = $wire)] $variant ),+
        }

        impl $type {
            /// Every variant, in declaration order
            pub const ALL: &'static [$type] = &[ $( $type::$variant ),+ ];

            /// Wire name of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $type::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl ::std::str::FromStr for $type {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($type::$variant), )+
                    other => Err(format!("unknown {}: {}", stringify!($type), other)),
                }
            }
        }

        impl $crate::core::field::ToFieldValue for $type {
            fn to_field_value(&self) -> $crate::core::field::FieldValue {
                $crate::core::field::FieldValue::String(self.as_str().to_string())
            }
        }
    };
}
