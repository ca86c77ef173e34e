//! Typed error handling for dashview
//!
//! The view core itself never fails on data-shape problems: bad fields are
//! excluded and bad page numbers are clamped. Errors only come from
//! construction (contract violations), configuration and data sources.
//!
//! # Error Categories
//!
//! - [`ViewError`]: top-level error returned by controllers
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match ViewController::<Contact>::new(config) {
//!     Ok(controller) => { /* ... */ }
//!     Err(ViewError::InvalidPageSize { screen }) => {
//!         eprintln!("screen {} has page_size = 0", screen);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

/// The main error type for dashview
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A controller was configured with a page size of zero
    #[error("screen '{screen}' has an invalid page size: must be greater than 0")]
    InvalidPageSize { screen: String },

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The data source failed to deliver records
    #[error("failed to load records for screen '{screen}': {message}")]
    Source { screen: String, message: String },
}

impl ViewError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewError::InvalidPageSize { .. } => "INVALID_PAGE_SIZE",
            ViewError::Config(e) => e.error_code(),
            ViewError::Source { .. } => "SOURCE_ERROR",
        }
    }
}

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// The same screen is configured twice
    #[error("Screen '{name}' is configured more than once")]
    DuplicateScreen { name: String },

    /// No screen with that name is configured
    #[error("Unknown screen: {name}")]
    UnknownScreen { name: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::DuplicateScreen { .. } => "CONFIG_DUPLICATE_SCREEN",
            ConfigError::UnknownScreen { .. } => "CONFIG_UNKNOWN_SCREEN",
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for dashview operations
pub type ViewResult<T> = Result<T, ViewError>;
