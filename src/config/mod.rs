//! Screen configuration loading and management

use crate::core::error::ConfigError;
use crate::core::pipeline::FieldConfig;
use crate::core::query::NO_CONSTRAINT;
use crate::core::record::DEFAULT_TIMESTAMP_FIELD;
use crate::core::sort::SortState;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Largest UTC offset in use anywhere (UTC+14:00)
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

fn default_sentinel() -> String {
    NO_CONSTRAINT.to_string()
}

fn default_date_field() -> String {
    DEFAULT_TIMESTAMP_FIELD.to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_refresh_interval() -> u64 {
    30
}

/// An exact-match filter offered by a screen (e.g. a status dropdown)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterFieldConfig {
    /// Record field the filter applies to
    pub field: String,

    /// Value meaning "no constraint" (e.g., "ALL", "TOUS")
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Values offered to the user, excluding the sentinel
    #[serde(default)]
    pub options: Vec<String>,
}

impl FilterFieldConfig {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            sentinel: default_sentinel(),
            options: Vec::new(),
        }
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration for one list screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Screen name (e.g., "contacts", "messages")
    pub name: String,

    /// Fields matched by the search box
    #[serde(default)]
    pub search_fields: Vec<String>,

    /// Exact-match filters offered by the screen
    #[serde(default)]
    pub filter_fields: Vec<FilterFieldConfig>,

    /// Field holding the record timestamp, used by date filters
    #[serde(default = "default_date_field")]
    pub date_field: String,

    /// Initial sort expression (`field`, `field:asc`, `field:desc`)
    ///
    /// Defaults to `date_field` descending.
    #[serde(default)]
    pub sort: Option<String>,

    /// Number of items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Background refresh period in seconds; 0 disables polling
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Offset (in minutes east of UTC) of the calendar used by date filters
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl ScreenConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search_fields: Vec::new(),
            filter_fields: Vec::new(),
            date_field: default_date_field(),
            sort: None,
            page_size: default_page_size(),
            refresh_interval_secs: default_refresh_interval(),
            utc_offset_minutes: 0,
        }
    }

    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filter_field(mut self, filter: FilterFieldConfig) -> Self {
        self.filter_fields.push(filter);
        self
    }

    pub fn with_date_field(mut self, field: impl Into<String>) -> Self {
        self.date_field = field.into();
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_refresh_interval_secs(mut self, secs: u64) -> Self {
        self.refresh_interval_secs = secs;
        self
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Find the filter configured for `field`
    pub fn filter_field(&self, field: &str) -> Option<&FilterFieldConfig> {
        self.filter_fields.iter().find(|f| f.field == field)
    }

    /// Initial sort state
    ///
    /// A malformed sort expression falls back to newest first.
    pub fn sort_state(&self) -> SortState {
        match self.sort.as_deref() {
            Some(expr) => expr.parse().unwrap_or_else(|err| {
                tracing::warn!(screen = %self.name, error = %err, "Falling back to default sort");
                SortState::newest_first(&self.date_field)
            }),
            None => SortState::newest_first(&self.date_field),
        }
    }

    /// Offset of the calendar used by date filters
    ///
    /// Out-of-range offsets fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Background refresh period, `None` when polling is disabled
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    /// Field knowledge handed to the filter/sort pipeline
    pub fn field_config(&self) -> FieldConfig {
        self.filter_fields.iter().fold(
            FieldConfig::new(&self.date_field)
                .with_search_fields(self.search_fields.iter().cloned())
                .with_utc_offset(self.utc_offset()),
            |config, filter| config.with_sentinel(&filter.field, &filter.sentinel),
        )
    }

    /// Check the configuration for values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(invalid(&self.name, "name", "", "screen name must not be empty"));
        }

        if self.page_size == 0 {
            return Err(invalid(&self.name, "page_size", "0", "must be greater than 0"));
        }

        if self.date_field.trim().is_empty() {
            return Err(invalid(&self.name, "date_field", "", "must name a field"));
        }

        if let Some(expr) = &self.sort {
            expr.parse::<SortState>()
                .map_err(|err| invalid(&self.name, "sort", expr, &err.to_string()))?;
        }

        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(invalid(
                &self.name,
                "utc_offset_minutes",
                &self.utc_offset_minutes.to_string(),
                "must be within ±14 hours",
            ));
        }

        let mut seen = HashSet::new();
        for filter in &self.filter_fields {
            if !seen.insert(filter.field.as_str()) {
                return Err(invalid(
                    &self.name,
                    "filter_fields",
                    &filter.field,
                    "filter field configured twice",
                ));
            }
        }

        Ok(())
    }
}

fn invalid(screen: &str, field: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: format!("{}.{}", screen, field),
        value: value.to_string(),
        message: message.to_string(),
    }
}

/// Complete configuration for every list screen of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// One entry per screen
    pub screens: Vec<ScreenConfig>,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Find a screen by name
    pub fn screen(&self, name: &str) -> Result<&ScreenConfig, ConfigError> {
        self.screens
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigError::UnknownScreen {
                name: name.to_string(),
            })
    }

    /// Validate every screen and reject duplicate names
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for screen in &self.screens {
            if !seen.insert(screen.name.as_str()) {
                return Err(ConfigError::DuplicateScreen {
                    name: screen.name.clone(),
                });
            }
            screen.validate()?;
        }
        Ok(())
    }

    /// Merge several configurations
    ///
    /// Screens keep their first-seen position; a later definition of the same
    /// screen replaces the earlier one.
    pub fn merge(configs: Vec<DashboardConfig>) -> Self {
        let mut screens: Vec<ScreenConfig> = Vec::new();

        for screen in configs.into_iter().flat_map(|c| c.screens) {
            match screens.iter_mut().find(|s| s.name == screen.name) {
                Some(existing) => *existing = screen,
                None => screens.push(screen),
            }
        }

        Self { screens }
    }

    /// Configuration of the stock dashboard screens
    pub fn default_config() -> Self {
        Self {
            screens: vec![
                ScreenConfig::new("contacts")
                    .with_search_fields(["name", "number"])
                    .with_filter_field(FilterFieldConfig::new("group_id"))
                    .with_sort("name:asc"),
                ScreenConfig::new("groups")
                    .with_search_fields(["name", "description"])
                    .with_sort("name:asc"),
                ScreenConfig::new("messages")
                    .with_search_fields(["reference", "sender", "body", "recipient"])
                    .with_filter_field(
                        FilterFieldConfig::new("status")
                            .with_sentinel("TOUS")
                            .with_options(["PENDING", "SCHEDULED", "SENT", "DELIVERED", "FAILED"]),
                    )
                    .with_date_field("sent_at"),
                ScreenConfig::new("tickets")
                    .with_search_fields(["reference", "subject"])
                    .with_filter_field(
                        FilterFieldConfig::new("status")
                            .with_options(["OPEN", "IN_PROGRESS", "RESOLVED", "CLOSED"]),
                    )
                    .with_filter_field(
                        FilterFieldConfig::new("priority").with_options(["LOW", "MEDIUM", "HIGH"]),
                    ),
                ScreenConfig::new("credit_orders")
                    .with_search_fields(["reference", "payment_method"])
                    .with_filter_field(
                        FilterFieldConfig::new("status")
                            .with_options(["PENDING", "PAID", "CANCELLED", "REJECTED"]),
                    ),
                ScreenConfig::new("invoices")
                    .with_search_fields(["number"])
                    .with_filter_field(
                        FilterFieldConfig::new("status").with_options(["UNPAID", "PAID", "OVERDUE"]),
                    )
                    .with_date_field("issued_at"),
            ],
        }
    }
}
