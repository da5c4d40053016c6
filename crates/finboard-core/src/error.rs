//! Error types for finboard-core
//!
//! The query functions themselves are total; errors only arise around them:
//! loading the dataset, parsing filter input from the outside, and removing
//! records that do not exist.

use finboard_config::ConfigError;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Dataset file missing
    DatasetNotFound,
    /// Dataset could not be parsed
    ParseError,
    /// Two records share an id
    DuplicateEntry,
    /// Filter input could not be understood
    InvalidFilter,
    /// No open position with the id
    PositionNotFound,
    /// No open order with the id
    OrderNotFound,
    /// IO error
    IoError,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::DatasetNotFound => write!(f, "DATASET_NOT_FOUND"),
            ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
            ErrorCode::InvalidFilter => write!(f, "INVALID_FILTER"),
            ErrorCode::PositionNotFound => write!(f, "POSITION_NOT_FOUND"),
            ErrorCode::OrderNotFound => write!(f, "ORDER_NOT_FOUND"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - the dashboard cannot start
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for finboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Dataset not found: {path}")]
    DatasetNotFound { path: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    #[error("Position not found: {id}")]
    PositionNotFound { id: String },

    #[error("Order not found: {id}")]
    OrderNotFound { id: String },

    #[error("IO error occurred")]
    IoError,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::DatasetNotFound { .. } => ErrorCode::DatasetNotFound,
            CoreError::ParseError { .. } => ErrorCode::ParseError,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            CoreError::InvalidFilter { .. } => ErrorCode::InvalidFilter,
            CoreError::PositionNotFound { .. } => ErrorCode::PositionNotFound,
            CoreError::OrderNotFound { .. } => ErrorCode::OrderNotFound,
            CoreError::IoError => ErrorCode::IoError,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::DatasetNotFound { .. } => ErrorSeverity::Critical,
            CoreError::ParseError { .. } => ErrorSeverity::Critical,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Error,
            CoreError::InvalidFilter { .. } => ErrorSeverity::Warning,
            CoreError::PositionNotFound { .. } => ErrorSeverity::Info,
            CoreError::OrderNotFound { .. } => ErrorSeverity::Info,
            CoreError::IoError => ErrorSeverity::Error,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::DatasetNotFound { .. } => {
                details = details.with_suggestion(
                    "Check data.path and data.dataset_file in your config file.".to_string()
                );
            }
            CoreError::ParseError { message } => {
                details = details.with_detail(serde_json::json!({ "parse_message": message }));
                details = details.with_suggestion(
                    "Check the YAML syntax and field names of the dataset.".to_string()
                );
            }
            CoreError::DuplicateEntry { entry } => {
                details = details.with_suggestion(format!(
                    "Give '{}' a unique id; ids are used as row keys.", entry
                ));
            }
            CoreError::InvalidFilter { message } => {
                details = details.with_detail(serde_json::json!({ "filter_message": message }));
                details = details.with_suggestion(
                    "Use 'all' or one of: Deposit, ACH, Purchase, Withdrawal, Transfer.".to_string()
                );
                details = details.with_suggestion(
                    "Dates are written as YYYY-MM-DD.".to_string()
                );
            }
            CoreError::PositionNotFound { .. } | CoreError::OrderNotFound { .. } => {
                details = details.with_suggestion(
                    "The record may already have been removed.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(_error: io::Error) -> Self {
        CoreError::IoError
    }
}

impl From<ConfigError> for CoreError {
    fn from(error: ConfigError) -> Self {
        CoreError::ConfigError {
            message: error.to_details().to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let severity = error.severity();
        let level = match severity {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        };
        log::log!(
            target: "finboard::error",
            level,
            "{} [{}] {} - Operation: {} - Data: {}",
            severity,
            error.code(),
            error.to_details(),
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================
