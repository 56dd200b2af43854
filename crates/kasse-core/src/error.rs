//! # Error Types
//!
//! Domain-specific error types for kasse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kasse-core errors (this file)                                         │
//! │  ├── CoreError        - Checkout and lookup failures                   │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  kasse-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  app errors (apps/kasse)                                               │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Cart operations themselves never fail; these come from checkout and
/// from screens resolving ids against what they loaded.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The customer handed over less than the order total.
    #[error("Cash given {given} is less than total {total}")]
    InsufficientCash { total: Money, given: Money },

    /// Product id is not among the loaded products.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Category id is not among the loaded categories.
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised by the Products screen forms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for a missing field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
