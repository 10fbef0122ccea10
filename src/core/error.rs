//! Typed error handling for gestor
//!
//! The list pipeline itself never fails: filtering, sorting and pagination
//! degrade to empty or unchanged results. Errors only come from parsing
//! input that arrives from outside (sort expressions, screen configuration,
//! uploaded files, work order transitions).
//!
//! # Error Categories
//!
//! - [`QueryError`]: malformed sort expressions or list parameters
//! - [`ConfigError`]: screen configuration that cannot be used
//! - [`UploadError`]: bulk upload files rejected before sending
//! - [`WorkflowError`]: work order actions not allowed in the current state
//! - [`SalesError`]: sales and client payments that cannot be recorded
//!
//! # Example
//!
//! ```rust
//! use gestor::core::error::GestorError;
//! use gestor::core::sort::SortSpec;
//!
//! let err: GestorError = SortSpec::parse("monto:up").unwrap_err().into();
//! assert_eq!(err.error_code(), "INVALID_SORT_DIRECTION");
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type for gestor
#[derive(Debug, Error)]
pub enum GestorError {
    /// Sort and list parameter errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bulk upload errors
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Work order workflow errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Sales and payment errors
    #[error(transparent)]
    Sales(#[from] SalesError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body handed to the UI layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl GestorError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GestorError::Query(e) => e.error_code(),
            GestorError::Config(e) => e.error_code(),
            GestorError::Upload(e) => e.error_code(),
            GestorError::Workflow(e) => e.error_code(),
            GestorError::Sales(e) => e.error_code(),
            GestorError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            GestorError::Upload(UploadError::MissingColumns { columns }) => {
                Some(serde_json::json!({ "missing_columns": columns }))
            }
            GestorError::Workflow(WorkflowError::InvalidTransition { status, action }) => {
                Some(serde_json::json!({
                    "status": status,
                    "action": action
                }))
            }
            GestorError::Config(ConfigError::UnknownScreen { name }) => {
                Some(serde_json::json!({ "screen": name }))
            }
            GestorError::Sales(
                SalesError::MissingProduct { line } | SalesError::InvalidQuantity { line, .. },
            ) => Some(serde_json::json!({ "line": line })),
            _ => None,
        }
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors parsing sort expressions and list parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Sort expression has no field before the direction
    #[error("Sort expression '{expression}' has no field")]
    EmptySortField { expression: String },

    /// Direction other than asc/desc
    #[error("Invalid sort direction '{direction}', expected 'asc' or 'desc'")]
    InvalidSortDirection { direction: String },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::EmptySortField { .. } => "EMPTY_SORT_FIELD",
            QueryError::InvalidSortDirection { .. } => "INVALID_SORT_DIRECTION",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors in screen configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No screen with that name
    #[error("Unknown screen: {name}")]
    UnknownScreen { name: String },

    /// Page size of zero
    #[error("Screen '{screen}' has a page size of 0")]
    ZeroPageSize { screen: String },

    /// Default page size missing from the page size options
    #[error("Screen '{screen}' uses page size {page_size}, which is not among its options")]
    PageSizeNotOffered { screen: String, page_size: usize },

    /// Default sort expression does not parse
    #[error("Screen '{screen}' has an invalid default sort: {source}")]
    InvalidDefaultSort {
        screen: String,
        #[source]
        source: QueryError,
    },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::UnknownScreen { .. } => "UNKNOWN_SCREEN",
            ConfigError::ZeroPageSize { .. } => "ZERO_PAGE_SIZE",
            ConfigError::PageSizeNotOffered { .. } => "PAGE_SIZE_NOT_OFFERED",
            ConfigError::InvalidDefaultSort { .. } => "INVALID_DEFAULT_SORT",
        }
    }
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Errors rejecting a bulk upload file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Extension other than xls/xlsx/csv
    #[error("Unsupported file type '{extension}', expected .xls, .xlsx or .csv")]
    UnsupportedFileType { extension: String },

    /// Required CSV columns absent from the header row
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Unknown upload target
    #[error("Unknown upload type: {name}")]
    UnknownUploadKind { name: String },
}

impl UploadError {
    pub fn error_code(&self) -> &'static str {
        match self {
            UploadError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            UploadError::MissingColumns { .. } => "MISSING_COLUMNS",
            UploadError::UnknownUploadKind { .. } => "UNKNOWN_UPLOAD_KIND",
        }
    }
}

// =============================================================================
// Workflow Errors
// =============================================================================

/// Errors in the work order lifecycle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// Status label not recognised
    #[error("Unknown work order status: {label}")]
    UnknownStatus { label: String },

    /// Action not allowed from the current status
    #[error("Cannot {action} a work order in status '{status}'")]
    InvalidTransition { status: String, action: String },

    /// Partial payment without an amount
    #[error("A partial payment requires an amount")]
    MissingPaymentAmount,

    /// Partial payment of zero or less, or not a number
    #[error("Payment amount must be a positive number, got {amount}")]
    NonPositivePayment { amount: f64 },

    /// Partial payment above the order total
    #[error("Payment amount {amount} exceeds the order total {total}")]
    PaymentExceedsTotal { amount: f64, total: f64 },
}

impl WorkflowError {
    pub fn error_code(&self) -> &'static str {
        match self {
            WorkflowError::UnknownStatus { .. } => "UNKNOWN_STATUS",
            WorkflowError::InvalidTransition { .. } => "INVALID_TRANSITION",
            WorkflowError::MissingPaymentAmount => "MISSING_PAYMENT_AMOUNT",
            WorkflowError::NonPositivePayment { .. } => "NON_POSITIVE_PAYMENT",
            WorkflowError::PaymentExceedsTotal { .. } => "PAYMENT_EXCEEDS_TOTAL",
        }
    }
}

// =============================================================================
// Sales Errors
// =============================================================================

/// Errors in sales and client payments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalesError {
    /// No client selected
    #[error("A sale requires a client")]
    MissingClient,

    /// Sale without lines
    #[error("A sale requires at least one product")]
    NoLines,

    /// Line without a product
    #[error("Line {line} has no product")]
    MissingProduct { line: usize },

    /// Quantity of zero or less, or not a number
    #[error("Line {line} has an invalid quantity {cantidad}")]
    InvalidQuantity { line: usize, cantidad: f64 },

    /// Payment amount of zero or less, or not a number
    #[error("Payment amount must be a positive number, got {monto}")]
    InvalidPaymentAmount { monto: f64 },
}

impl SalesError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SalesError::MissingClient => "MISSING_CLIENT",
            SalesError::NoLines => "NO_SALE_LINES",
            SalesError::MissingProduct { .. } => "MISSING_PRODUCT",
            SalesError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            SalesError::InvalidPaymentAmount { .. } => "INVALID_PAYMENT_AMOUNT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let err = QueryError::InvalidSortDirection {
            direction: "up".to_string(),
        };
        assert!(err.to_string().contains("'up'"));
        assert_eq!(err.error_code(), "INVALID_SORT_DIRECTION");
    }

    #[test]
    fn test_missing_columns_display() {
        let err = UploadError::MissingColumns {
            columns: vec!["cedula".to_string(), "telefono".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required columns: cedula, telefono");
    }

    #[test]
    fn test_gestor_error_from_category() {
        let err: GestorError = WorkflowError::MissingPaymentAmount.into();
        assert_eq!(err.error_code(), "MISSING_PAYMENT_AMOUNT");
        assert_eq!(err.to_string(), "A partial payment requires an amount");
    }

    #[test]
    fn test_response_details() {
        let err = GestorError::from(UploadError::MissingColumns {
            columns: vec!["costo".to_string()],
        });
        let response = err.to_response();
        assert_eq!(response.code, "MISSING_COLUMNS");
        assert_eq!(
            response.details,
            Some(serde_json::json!({"missing_columns": ["costo"]}))
        );
    }

    #[test]
    fn test_sales_error_response() {
        let err = GestorError::from(SalesError::MissingProduct { line: 3 });
        let response = err.to_response();
        assert_eq!(response.code, "MISSING_PRODUCT");
        assert_eq!(response.message, "Line 3 has no product");
        assert_eq!(response.details, Some(serde_json::json!({"line": 3})));
    }

    #[test]
    fn test_response_without_details_skips_field() {
        let err = GestorError::Internal("boom".to_string());
        let json = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_config_error_source() {
        use std::error::Error as _;

        let err = ConfigError::InvalidDefaultSort {
            screen: "ventas".to_string(),
            source: QueryError::EmptySortField {
                expression: ":asc".to_string(),
            },
        };
        assert!(err.source().is_some());
    }
}
