//! Data-source trait feeding list screens

use crate::core::record::Record;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identity of the dashboard user a fetch is made for
///
/// Passed explicitly to every [`RecordSource`] call so that no screen has to
/// resolve the current client from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContext {
    /// Customer account whose records are listed
    pub client_id: String,

    /// Logged-in user, when the backend distinguishes users of one account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Preferred locale (e.g. "fr-SN")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl ClientContext {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            user_id: None,
            locale: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Service trait delivering the full collection behind a screen
///
/// Every successful result is treated as a wholesale replacement of the
/// screen's data. Transport, retries and timeouts are the implementation's
/// business.
#[async_trait]
pub trait RecordSource<T: Record>: Send + Sync {
    /// Fetch all records visible to `ctx`
    async fn fetch_records(&self, ctx: &ClientContext) -> Result<Vec<T>>;
}
