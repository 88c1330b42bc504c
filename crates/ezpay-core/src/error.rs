//! Error types for ezpay-core
//!
//! This module provides error handling for the transaction registry,
//! including error codes, detailed messages, and suggestions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TransactionId;
use crate::types::TransactionStatus;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transaction not found
    TransactionNotFound,
    /// Input failed validation
    ValidationError,
    /// Status change not allowed
    InvalidStatusTransition,
    /// Transaction already left PENDING
    AlreadyProcessed,
    /// Duplicate entry
    DuplicateEntry,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::InvalidStatusTransition => write!(f, "INVALID_STATUS_TRANSITION"),
            ErrorCode::AlreadyProcessed => write!(f, "ALREADY_PROCESSED"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Offending input field (for validation errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
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
            field: None,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_field(mut self, field: String) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, "\nField: {}", field)?;
        }
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
    /// Informational - a normal outcome the caller should handle
    Info,
    /// Warning - request rejected, caller can correct it
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for ezpay-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: TransactionId },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Transaction {id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        id: TransactionId,
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Transaction {id} already processed: {status}")]
    AlreadyProcessed {
        id: TransactionId,
        status: TransactionStatus,
    },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },
}

impl CoreError {
    /// Shorthand for a validation failure on `field`
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CoreError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::InvalidStatusTransition { .. } => ErrorCode::InvalidStatusTransition,
            CoreError::AlreadyProcessed { .. } => ErrorCode::AlreadyProcessed,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::InvalidStatusTransition { .. } => ErrorSeverity::Warning,
            CoreError::AlreadyProcessed { .. } => ErrorSeverity::Warning,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::TransactionNotFound { .. } => {
                details = details.with_suggestion(
                    "Check if the transaction ID is correct.".to_string(),
                );
                details = details.with_suggestion(
                    "List transactions to find existing IDs.".to_string(),
                );
            }
            CoreError::ValidationError { field, message } => {
                details = details.with_field(field.clone());
                details = details.with_suggestion(message.clone());
            }
            CoreError::InvalidStatusTransition { from, to, .. } => {
                details = details.with_detail(serde_json::json!({ "from": from, "to": to }));
                if *to == TransactionStatus::Pending || from.is_terminal() {
                    details = details.with_suggestion(
                        "SUCCESS and FAILED transactions are final.".to_string(),
                    );
                }
            }
            CoreError::AlreadyProcessed { status, .. } => {
                details = details.with_detail(serde_json::json!({ "status": status }));
                details = details.with_suggestion(
                    "Only PENDING transactions can be processed.".to_string(),
                );
            }
            CoreError::DuplicateEntry { .. } => {
                details = details.with_suggestion(
                    "Transaction IDs must be unique within a registry.".to_string(),
                );
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

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
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::debug!(
                target: "ezpay::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(), error, context.operation, context.data
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "ezpay::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(), error, context.operation, context.data
            ),
            ErrorSeverity::Error => log::error!(
                target: "ezpay::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(), error.to_details(), context.operation, context.data
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::TransactionNotFound.to_string(), "TRANSACTION_NOT_FOUND");
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(
            ErrorCode::InvalidStatusTransition.to_string(),
            "INVALID_STATUS_TRANSITION"
        );
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(CoreError::TransactionNotFound { id: 1 }.severity(), ErrorSeverity::Info);
        assert_eq!(
            CoreError::validation("amount", "must be positive").severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            CoreError::DuplicateEntry { entry: "id 1".to_string() }.severity(),
            ErrorSeverity::Error
        );
    }

    #[test]
    fn test_validation_details_carry_field() {
        let details = CoreError::validation("ifscCode", "Invalid IFSC code").to_details();
        assert_eq!(details.code, ErrorCode::ValidationError);
        assert_eq!(details.field.as_deref(), Some("ifscCode"));
        assert!(details.message.contains("ifscCode"));
    }

    #[test]
    fn test_transition_details() {
        let error = CoreError::InvalidStatusTransition {
            id: 3,
            from: TransactionStatus::Success,
            to: TransactionStatus::Pending,
        };
        let details = error.to_details();
        assert_eq!(details.details, Some(serde_json::json!({"from": "SUCCESS", "to": "PENDING"})));
        assert!(!details.suggestions.is_empty());
        assert!(error.to_string().contains("SUCCESS"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("process").with_data("id", serde_json::json!(4));
        assert_eq!(context.operation, "process");
        assert_eq!(context.data["id"], 4);
    }
}
