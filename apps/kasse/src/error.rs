//! # App Error Type
//!
//! Unified error type for screens and CLI commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen method                                                          │
//! │  Result<T, AppError>                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Database Error?   ─── DbError::QueryFailed("...") ─────┐               │
//! │         │                                               │               │
//! │         ▼                                               ▼               │
//! │  Validation Error? ─── ValidationError::Required ──► AppError ──► CLI   │
//! │         │                                               ▲               │
//! │         ▼                                               │               │
//! │  Checkout Error?   ─── CoreError::InsufficientCash ─────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI prints `message` to the cashier; with `--json` the whole error
//! is serialized:
//! ```json
//! { "code": "PAYMENT_ERROR", "message": "Cash given 5.00 is less than total 6.00" }
//! ```

use serde::Serialize;
use thiserror::Error;

use kasse_core::{CoreError, ValidationError};
use kasse_db::DbError;

/// Error returned from screens and commands.
#[derive(Debug, Clone, Error, Serialize)]
#[error("[{code:?}] {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for app errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Category, product or order not found
    NotFound,

    /// Form input rejected
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Checkout with an empty cart
    CartError,

    /// Not enough cash handed over
    PaymentError,

    /// Unrecognized register command
    InvalidCommand,

    /// Terminal I/O or other unexpected failure
    Internal,
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidCommand, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, id),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::new(ErrorCode::ValidationError, "Invalid category reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::SchemaFailed(e) => {
                tracing::error!("Schema initialization failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database setup failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => AppError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::InsufficientCash { .. } => {
                AppError::new(ErrorCode::PaymentError, err.to_string())
            }
            CoreError::ProductNotFound(id) => AppError::not_found("Product", id),
            CoreError::CategoryNotFound(id) => AppError::not_found("Category", id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON output failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasse_core::Money;

    #[test]
    fn test_db_not_found_keeps_entity_and_id() {
        let err: AppError = DbError::not_found("Category", 7).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Category not found: 7");
    }

    #[test]
    fn test_db_internals_are_hidden() {
        let err: AppError = DbError::QueryFailed("near \"SELEC\": syntax error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: AppError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: AppError = CoreError::InsufficientCash {
            total: Money::from_cents(600),
            given: Money::from_cents(500),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Cash given 5.00 is less than total 6.00");

        let err: AppError = CoreError::Validation(ValidationError::required("price")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "price is required");
    }

    #[test]
    fn test_serializes_with_screaming_code() {
        let err = AppError::not_found("Product", 3);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 3");
        assert_eq!(err.to_string(), "[NotFound] Product not found: 3");
    }
}
